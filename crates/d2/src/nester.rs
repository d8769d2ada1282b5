//! Multi-strategy bounding-box sheet nester.

use std::sync::Arc;

use lasernest_core::geom::check_bounding_box_collision;
use lasernest_core::{
    BoundingBox, NestingConfig, NestingResult, Part, PlacedPart, Point, Result, Solver, Strategy,
    MM2_PER_M2,
};
use log::{debug, info, warn};
use rayon::prelude::*;

/// Number of layouts returned by [`Nester2D::solve`].
pub const TOP_VARIANTS: usize = 3;

/// Greedy bottom-left nester over rotated bounding boxes.
///
/// Runs one packing pass per [`Strategy`] and keeps the best
/// [`TOP_VARIANTS`] layouts.
#[derive(Debug, Clone)]
pub struct Nester2D {
    config: NestingConfig,
    parallel: bool,
}

/// Best position found so far for one part.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    position: Point,
    rotation: f64,
    footprint: BoundingBox,
}

impl Nester2D {
    /// Creates a new nester with the given configuration.
    pub fn new(config: NestingConfig) -> Self {
        Self {
            config,
            parallel: false,
        }
    }

    /// Creates a nester with default configuration.
    pub fn default_config() -> Self {
        Self::new(NestingConfig::default())
    }

    /// Runs the strategy passes on the rayon pool. Output order is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Packs `parts` onto a single sheet in the order given by `strategy`.
    ///
    /// Parts that fit nowhere go to [`NestingResult::unplaced_parts`].
    pub fn pack(&self, parts: &[Arc<Part>], strategy: Strategy) -> NestingResult {
        let mut order: Vec<&Arc<Part>> = parts.iter().collect();
        order.sort_by(|a, b| strategy.compare(a, b));

        let mut result = NestingResult::new(strategy);
        for part in order {
            match self.find_best_position(part, &result.placed_parts) {
                Some(best) => result.placed_parts.push(PlacedPart::new(
                    Arc::clone(part),
                    best.position.x,
                    best.position.y,
                    best.rotation,
                    best.footprint,
                )),
                None => {
                    warn!("{}: could not place {}", strategy, part.id);
                    result.unplaced_parts.push(Arc::clone(part));
                }
            }
        }

        self.finalize(&mut result);
        debug!(
            "{}: placed {}/{}, efficiency {}",
            strategy,
            result.placed_count(),
            result.total_parts(),
            result.efficiency_percent()
        );
        result
    }

    /// Lowest-scoring valid position over all rotations, `2y + x`. The first
    /// candidate wins ties.
    fn find_best_position(&self, part: &Part, placed: &[PlacedPart]) -> Option<Candidate> {
        let config = &self.config;
        let margin = config.edge_margin;
        let spacing = config.min_spacing;
        let mut best: Option<Candidate> = None;

        for &rotation in &config.rotation_angles {
            let footprint = config.rotation_model.rotate(&part.bounding_box, rotation);
            if footprint.width + 2.0 * margin > config.max_sheet_width
                || footprint.height + 2.0 * margin > config.max_sheet_height
            {
                continue;
            }

            for position in self.candidate_positions(&footprint, placed) {
                if !self.fits_sheet(&footprint, &position) {
                    continue;
                }
                let collides = placed.iter().any(|p| {
                    check_bounding_box_collision(
                        &p.bounding_box,
                        &p.position(),
                        &footprint,
                        &position,
                        spacing,
                    )
                });
                if collides {
                    continue;
                }

                let score = 2.0 * position.y + position.x;
                if best.map_or(true, |b| score < b.score) {
                    best = Some(Candidate {
                        score,
                        position,
                        rotation,
                        footprint,
                    });
                }
            }
        }

        best
    }

    /// Origin corner plus five positions around each placed part.
    fn candidate_positions(&self, footprint: &BoundingBox, placed: &[PlacedPart]) -> Vec<Point> {
        let margin = self.config.edge_margin;
        let spacing = self.config.min_spacing;

        let mut positions = Vec::with_capacity(1 + placed.len() * 5);
        positions.push(Point::new(margin, margin));

        for p in placed {
            let right = p.right() + spacing;
            let below = p.bottom() + spacing;
            positions.push(Point::new(right, p.y));
            positions.push(Point::new(p.x, below));
            positions.push(Point::new(right, below));
            positions.push(Point::new(margin.max(p.x - footprint.width - spacing), p.y));
            positions.push(Point::new(p.x, margin.max(p.y - footprint.height - spacing)));
        }

        positions
    }

    fn fits_sheet(&self, footprint: &BoundingBox, position: &Point) -> bool {
        let config = &self.config;
        let margin = config.edge_margin;
        position.x >= margin
            && position.y >= margin
            && position.x + footprint.width + margin <= config.max_sheet_width
            && position.y + footprint.height + margin <= config.max_sheet_height
    }

    /// Fills in consumed sheet size, areas, efficiency, cost and pierces.
    fn finalize(&self, result: &mut NestingResult) {
        let config = &self.config;
        let margin = config.edge_margin;

        let (max_x, max_y) = result
            .placed_parts
            .iter()
            .fold((margin, margin), |(x, y), p| {
                (x.max(p.right()), y.max(p.bottom()))
            });

        result.sheet_width = (max_x + margin).min(config.max_sheet_width);
        result.sheet_height = (max_y + margin).min(config.max_sheet_height);
        result.sheet_area = result.sheet_width * result.sheet_height / MM2_PER_M2;
        result.used_area =
            result.placed_parts.iter().map(|p| p.part.area).sum::<f64>() / MM2_PER_M2;
        result.efficiency = if result.sheet_area > 0.0 {
            result.used_area / result.sheet_area * 100.0
        } else {
            0.0
        };
        result.metal_cost = result.sheet_area * config.metal_cost_per_m2;
        result.pierce_points = result
            .placed_parts
            .iter()
            .map(|p| p.part.pierce_points())
            .sum();
    }

    /// Orders layouts by placed count, then efficiency, both descending, and
    /// keeps the first [`TOP_VARIANTS`]. Full ties keep strategy order.
    pub fn rank(mut results: Vec<NestingResult>) -> Vec<NestingResult> {
        results.sort_by(|a, b| {
            b.placed_count()
                .cmp(&a.placed_count())
                .then_with(|| b.efficiency.total_cmp(&a.efficiency))
        });
        results.truncate(TOP_VARIANTS);
        results
    }
}

impl Solver for Nester2D {
    fn solve(&self, parts: &[Part]) -> Result<Vec<NestingResult>> {
        self.config.validate()?;

        if parts.is_empty() {
            warn!("No parts to nest");
            return Ok(Vec::new());
        }

        info!(
            "Nesting {} parts on {}x{} sheet ({} strategies{})",
            parts.len(),
            self.config.max_sheet_width,
            self.config.max_sheet_height,
            Strategy::ALL.len(),
            if self.parallel { ", parallel" } else { "" }
        );

        let shared: Vec<Arc<Part>> = parts.iter().cloned().map(Arc::new).collect();
        let results: Vec<NestingResult> = if self.parallel {
            Strategy::ALL
                .par_iter()
                .map(|&strategy| self.pack(&shared, strategy))
                .collect()
        } else {
            Strategy::ALL
                .iter()
                .map(|&strategy| self.pack(&shared, strategy))
                .collect()
        };

        let ranked = Self::rank(results);
        for (i, result) in ranked.iter().enumerate() {
            info!(
                "Variant {}: {} with {}/{} placed, efficiency {}",
                i,
                result.strategy,
                result.placed_count(),
                result.total_parts(),
                result.efficiency_percent()
            );
        }

        Ok(ranked)
    }

    fn config(&self) -> &NestingConfig {
        &self.config
    }
}

/// Nests `parts` with `config` and returns up to three ranked layouts.
pub fn calculate_nesting(parts: &[Part], config: &NestingConfig) -> Result<Vec<NestingResult>> {
    Nester2D::new(config.clone()).solve(parts)
}
