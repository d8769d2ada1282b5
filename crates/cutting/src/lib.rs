//! Cut-length measurement and cutting summaries for nested layouts.
//!
//! The cutting head traces every contour of every placed part once: the
//! outer outline and each hole. This crate measures that path and collects,
//! per layout, the figures a laser-cutting order is priced from:
//!
//! - cut length in meters ([`layout_cut_length_m`])
//! - pierce count (one per outline, one per hole)
//! - consumed sheet area and its metal cost
//!
//! ```rust
//! use lasernest_core::{Entity, Point};
//! use lasernest_cutting::{drawing_cut_length_m, entity_cut_length};
//!
//! let hole = Entity::circle(Point::new(50.0, 50.0), 10.0);
//! assert!((entity_cut_length(&hole) - 62.83).abs() < 0.01);
//!
//! let drawing = vec![Entity::rectangle(0.0, 0.0, 100.0, 100.0), hole];
//! assert!((drawing_cut_length_m(&drawing) - 0.46283).abs() < 1e-5);
//! ```

pub mod length;
pub mod result;

pub use length::{
    drawing_cut_length_m, entity_cut_length, layout_cut_length_m, part_cut_length,
    ramanujan_perimeter, MM_PER_M,
};
pub use result::CuttingSummary;
