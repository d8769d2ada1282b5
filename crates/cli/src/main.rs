//! lasernest command-line interface

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lasernest_core::{NestingConfig, NestingResult, NestingSummary, RotationModel, Solver};
use lasernest_cutting::{drawing_cut_length_m, part_cut_length, CuttingSummary, MM_PER_M};
use lasernest_d2::{
    extract_closed_contours_with_report, group_contours_into_parts, parse_records, Nester2D,
    RawRecord,
};
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "lasernest")]
#[command(about = "Sheet nesting and cut measurement for laser-cut parts")]
#[command(version)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Nest the parts of a drawing and print the ranked layouts
    Nest(NestArgs),

    /// Print the closed contours and grouped parts of a drawing
    Contours {
        /// Drawing records as JSON (array or {"entities": [...]})
        file: PathBuf,
    },
}

#[derive(Args)]
struct NestArgs {
    /// Drawing records as JSON (array or {"entities": [...]})
    file: PathBuf,

    /// Material thickness in mm; selects the sheet format
    #[arg(short, long, default_value = "1.0")]
    thickness: f64,

    /// Minimum spacing between parts in mm
    #[arg(short, long)]
    spacing: Option<f64>,

    /// Margin from the sheet edges in mm
    #[arg(short, long)]
    margin: Option<f64>,

    /// Sheet width in mm (overrides the thickness format)
    #[arg(long)]
    sheet_width: Option<f64>,

    /// Sheet height in mm (overrides the thickness format)
    #[arg(long)]
    sheet_height: Option<f64>,

    /// Metal price per square meter
    #[arg(long)]
    metal_cost: Option<f64>,

    /// Use true rotated bounding boxes instead of the 90/270 swap
    #[arg(long)]
    exact_rotation: bool,

    /// Run the strategies in parallel
    #[arg(long)]
    parallel: bool,

    /// Output file for the ranked layouts (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl NestArgs {
    fn config(&self) -> NestingConfig {
        let mut config = NestingConfig::for_thickness(self.thickness);
        if let Some(spacing) = self.spacing {
            config = config.with_spacing(spacing);
        }
        if let Some(margin) = self.margin {
            config = config.with_margin(margin);
        }
        let width = self.sheet_width.unwrap_or(config.max_sheet_width);
        let height = self.sheet_height.unwrap_or(config.max_sheet_height);
        config = config.with_sheet_size(width, height);
        if let Some(cost) = self.metal_cost {
            config = config.with_metal_cost(cost);
        }
        if self.exact_rotation {
            config = config.with_rotation_model(RotationModel::Exact);
        }
        config
    }
}

#[derive(Serialize)]
struct VariantReport<'a> {
    summary: NestingSummary,
    cutting: CuttingSummary,
    layout: &'a NestingResult,
}

fn load_records(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let records =
        parse_records(&json).with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn run_nest(args: &NestArgs) -> anyhow::Result<()> {
    let records = load_records(&args.file)?;
    let (contours, report) = extract_closed_contours_with_report(&records);
    report
        .ensure_planar()
        .with_context(|| format!("Cannot nest {}", args.file.display()))?;
    let parts = group_contours_into_parts(&contours);

    let config = args.config();
    println!(
        "Sheet {}x{} mm, spacing {} mm, margin {} mm, {} parts",
        config.max_sheet_width,
        config.max_sheet_height,
        config.min_spacing,
        config.edge_margin,
        parts.len()
    );

    let nester = Nester2D::new(config).with_parallel(args.parallel);
    let results = nester.solve(&parts)?;
    if results.is_empty() {
        println!("No closed contours in {}", args.file.display());
        return Ok(());
    }

    println!(
        "\n{:<3} {:<16} {:>7} {:>9} {:>8} {:>10} {:>8} {:>9} {:>10}",
        "#", "Strategy", "Placed", "Unplaced", "Eff", "Sheet m²", "Pierces", "Cut m", "Metal"
    );
    println!("{:-<88}", "");
    let mut reports = Vec::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        let cutting = CuttingSummary::from_result(result);
        println!(
            "{:<3} {:<16} {:>7} {:>9} {:>8} {:>10.4} {:>8} {:>9.3} {:>10.2}",
            i,
            result.strategy.name(),
            result.placed_count(),
            result.unplaced_count(),
            result.efficiency_percent(),
            cutting.sheet_area_m2,
            cutting.pierce_points,
            cutting.cut_length_m,
            cutting.metal_cost
        );
        reports.push(VariantReport {
            summary: NestingSummary::from(result),
            cutting,
            layout: result,
        });
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&reports)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nResults saved to: {}", path.display());
    }

    Ok(())
}

fn run_contours(file: &Path) -> anyhow::Result<()> {
    let records = load_records(file)?;
    let (contours, report) = extract_closed_contours_with_report(&records);

    println!("Records:      {}", report.total);
    println!("Closed:       {}", report.closed);
    println!("Open:         {}", report.skipped_open);
    println!("Unbounded:    {}", report.skipped_unbounded);
    println!("Unrecognized: {}", report.skipped_unrecognized);
    println!("3D:           {}", report.non_planar);
    println!("Cut length:   {:.3} m", drawing_cut_length_m(&contours));

    let parts = group_contours_into_parts(&contours);
    println!(
        "\n{:<10} {:<10} {:>18} {:>12} {:>6} {:>9}",
        "Part", "Outline", "Size mm", "Area mm²", "Holes", "Cut m"
    );
    println!("{:-<70}", "");
    for part in &parts {
        let bbox = &part.bounding_box;
        let size = format!("{:.1}x{:.1}", bbox.width, bbox.height);
        println!(
            "{:<10} {:<10} {:>18} {:>12.1} {:>6} {:>9.3}",
            part.id,
            part.outer_contour.kind(),
            size,
            part.area,
            part.hole_count(),
            part_cut_length(part) / MM_PER_M
        );
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();

    match &cli.command {
        Commands::Nest(args) => run_nest(args),
        Commands::Contours { file } => run_contours(file),
    }
}
