//! Pure geometry utilities over drawing entities and bounding boxes.
//!
//! Nothing in here keeps state or fails loudly: degenerate input yields
//! `None`, `false` or `0.0`.

pub mod bbox;
pub mod contour;
pub mod polygon;

pub use bbox::{
    check_bounding_box_collision, rotate_bounding_box, rotate_bounding_box_exact, RotationModel,
};
pub use contour::{
    contour_area, contour_center, ellipse_semi_axes, entity_bounding_box, is_contour_closed,
    is_point_inside_contour, DEFAULT_CLOSURE_TOLERANCE,
};
pub use polygon::is_point_inside_polygon;
