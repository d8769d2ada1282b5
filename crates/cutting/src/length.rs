//! Cut length ("vector length") of contours, parts and layouts.
//!
//! Lengths are in drawing units (millimeters) unless the function name says
//! `_m`.

use std::f64::consts::{PI, TAU};

use geo::{Coord, Euclidean, Length, LineString};
use lasernest_core::geom::{ellipse_semi_axes, is_contour_closed, DEFAULT_CLOSURE_TOLERANCE};
use lasernest_core::{Entity, NestingResult, Part, Point, Shape};
use log::debug;

/// Millimeters per meter.
pub const MM_PER_M: f64 = 1000.0;

fn chain_length(points: &[Point], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    if closed {
        coords.push(coords[0]);
    }
    LineString::new(coords).length::<Euclidean>()
}

/// Angular sweep from `start` to `end` in radians, wrapped once when negative.
fn sweep(start: f64, end: f64) -> f64 {
    let range = end - start;
    if range < 0.0 {
        range + TAU
    } else {
        range
    }
}

/// Ramanujan's second approximation of an ellipse perimeter.
pub fn ramanujan_perimeter(a: f64, b: f64) -> f64 {
    if a + b == 0.0 {
        return 0.0;
    }
    let h = (a - b).powi(2) / (a + b).powi(2);
    PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

/// Length the cutting head travels along one entity.
///
/// Polylines add the closing segment only when flagged closed. Splines are
/// measured along their control polygon. Partial ellipses are scaled by their
/// parametric sweep. Returns 0 for entities whose length is not finite.
pub fn entity_cut_length(entity: &Entity) -> f64 {
    let length = match &entity.shape {
        Shape::Line { vertices } => chain_length(vertices, false),
        Shape::Polyline { vertices, closed } => chain_length(vertices, *closed),
        Shape::Circle { radius, .. } => TAU * radius,
        Shape::Arc {
            radius,
            start_angle,
            end_angle,
            ..
        } => (sweep(*start_angle, *end_angle) * radius).abs(),
        Shape::Ellipse {
            major_axis_end,
            axis_ratio,
            start_angle,
            end_angle,
            ..
        } => {
            let (a, b) = ellipse_semi_axes(major_axis_end, *axis_ratio);
            let full = ramanujan_perimeter(a, b);
            match (start_angle, end_angle) {
                (Some(start), Some(end)) => full * sweep(*start, *end) / TAU,
                _ => full,
            }
        }
        Shape::Spline { control_points, .. } => chain_length(control_points, false),
    };

    if length.is_finite() {
        length
    } else {
        debug!("Ignoring non-finite cut length of {} entity", entity.kind());
        0.0
    }
}

/// Outer contour plus all holes.
pub fn part_cut_length(part: &Part) -> f64 {
    part.contours().map(entity_cut_length).sum()
}

/// Total cut length of the placed parts of a layout, in meters.
pub fn layout_cut_length_m(result: &NestingResult) -> f64 {
    result
        .placed_parts
        .iter()
        .map(|p| part_cut_length(&p.part))
        .sum::<f64>()
        / MM_PER_M
}

/// Cut length of a whole drawing in meters, counting closed contours only.
pub fn drawing_cut_length_m(entities: &[Entity]) -> f64 {
    entities
        .iter()
        .filter(|e| is_contour_closed(e, DEFAULT_CLOSURE_TOLERANCE))
        .map(entity_cut_length)
        .sum::<f64>()
        / MM_PER_M
}
