//! # lasernest 2D
//!
//! Drawing ingestion and sheet nesting for laser-cut parts.
//!
//! This crate turns raw drawing records into closed contours, groups them
//! into parts with holes, and lays the parts out on a stock sheet.
//!
//! ## Pipeline
//!
//! 1. [`extract_closed_contours`]: keep records that form closed outlines;
//!    3D records are counted and dropped
//! 2. [`group_contours_into_parts`]: largest contours become outer
//!    contours, contained ones become holes
//! 3. [`Nester2D`]: greedy bottom-left packing over rotated bounding boxes,
//!    one pass per ordering [`Strategy`], best three layouts returned
//!
//! ## Quick Start
//!
//! ```rust
//! use lasernest_d2::{Entity, Nester2D, NestingConfig, Part, Point, Solver};
//!
//! let plate = Part::rectangle("part-0", 200.0, 100.0)
//!     .with_inner_contour(Entity::circle(Point::new(50.0, 50.0), 10.0));
//! let disc = Part::from_contour("part-1", Entity::circle(Point::new(0.0, 0.0), 40.0)).unwrap();
//!
//! let nester = Nester2D::new(NestingConfig::for_thickness(2.0));
//! let layouts = nester.solve(&[plate, disc]).unwrap();
//!
//! let best = &layouts[0];
//! assert_eq!(best.placed_count(), 2);
//! assert_eq!(best.pierce_points, 3);
//! println!("{}: {:.3} m², {}", best.strategy, best.sheet_area, best.efficiency_percent());
//! ```
//!
//! ## From Raw Records
//!
//! ```rust
//! use lasernest_d2::{nest_records_for_thickness, RawPoint, RawRecord};
//!
//! let circle = RawRecord {
//!     center: Some(RawPoint::new(0.0, 0.0)),
//!     radius: Some(25.0),
//!     ..RawRecord::new("CIRCLE")
//! };
//!
//! let layouts = nest_records_for_thickness(&[circle], 5.0).unwrap();
//! assert_eq!(layouts[0].placed_count(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support and `parse_records` for JSON drawings

pub mod extract;
pub mod grouping;
pub mod nester;

pub use extract::{
    extract_closed_contours, extract_closed_contours_with_report, normalize_record,
    ExtractionReport, RawPoint, RawRecord, PLANAR_TOLERANCE,
};
#[cfg(feature = "serde")]
pub use extract::parse_records;
pub use grouping::group_contours_into_parts;
pub use nester::{calculate_nesting, Nester2D, TOP_VARIANTS};

// Re-export core types
pub use lasernest_core::{
    BoundingBox, Entity, Error, NestingConfig, NestingResult, NestingSummary, Part, PlacedPart,
    Point, Result, RotationModel, Shape, SheetFormat, Solver, Strategy,
};

/// Extracts closed contours from `records` and groups them into parts.
pub fn parts_from_records(records: &[RawRecord]) -> Vec<Part> {
    group_contours_into_parts(&extract_closed_contours(records))
}

/// Runs the whole pipeline on raw records with an explicit configuration.
///
/// Fails with [`Error::InvalidGeometry`] when the drawing contains 3D records.
pub fn nest_records(records: &[RawRecord], config: &NestingConfig) -> Result<Vec<NestingResult>> {
    let (contours, report) = extract_closed_contours_with_report(records);
    report.ensure_planar()?;
    let parts = group_contours_into_parts(&contours);
    calculate_nesting(&parts, config)
}

/// Runs the whole pipeline with the default configuration for a material
/// thickness in millimeters.
pub fn nest_records_for_thickness(
    records: &[RawRecord],
    thickness: f64,
) -> Result<Vec<NestingResult>> {
    nest_records(records, &NestingConfig::for_thickness(thickness))
}
