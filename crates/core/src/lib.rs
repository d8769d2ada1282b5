//! # lasernest Core
//!
//! Data model, geometry utilities and configuration shared by the lasernest
//! crates.
//!
//! ## Core Components
//!
//! - **Drawing model**: [`Point`], [`BoundingBox`], [`Entity`] / [`Shape`]
//! - **Geometry utilities**: the [`geom`] module (closure, bounds, centers,
//!   containment, area, rotated footprints, spacing-aware collision)
//! - **Nesting model**: [`Part`], [`PlacedPart`], [`NestingResult`]
//! - **Configuration**: [`NestingConfig`], [`SheetFormat`], [`RotationModel`]
//! - **Solver trait**: [`Solver`] with the ordering [`Strategy`] set
//!
//! ## Configuration
//!
//! ```rust
//! use lasernest_core::{NestingConfig, RotationModel};
//!
//! let config = NestingConfig::for_thickness(4.0)
//!     .with_spacing(5.0)
//!     .with_margin(8.0)
//!     .with_rotations_deg(vec![0.0, 90.0])
//!     .with_rotation_model(RotationModel::Exact);
//!
//! assert_eq!(config.max_sheet_width, 1500.0);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geom;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use geom::RotationModel;
pub use geometry::{BoundingBox, Entity, Point, Shape, SourceRef};
pub use placement::{Part, PartId, PlacedPart};
pub use result::{NestingResult, NestingSummary, MM2_PER_M2};
pub use solver::{NestingConfig, SheetFormat, Solver, Strategy};
