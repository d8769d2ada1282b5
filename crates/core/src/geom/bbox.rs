//! Bounding-box rotation and spacing-aware collision tests.

use nalgebra::{Point2, Rotation2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};

/// How a part's footprint is derived for a given rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RotationModel {
    /// Swap width and height at 90° and 270°, keep the box unchanged for any
    /// other angle. Matches previously quoted layouts and prices.
    #[default]
    Legacy,
    /// True axis-aligned box of the rotated rectangle for every angle.
    Exact,
}

impl RotationModel {
    /// Footprint of `bbox` rotated by `degrees` under this model.
    pub fn rotate(&self, bbox: &BoundingBox, degrees: f64) -> BoundingBox {
        match self {
            Self::Legacy => rotate_bounding_box(bbox, degrees),
            Self::Exact => rotate_bounding_box_exact(bbox, degrees),
        }
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Rotates a bounding box, legacy rules.
///
/// At 90° and 270° width and height swap and the box is re-anchored at the
/// origin; callers must offset it. Any other angle returns `bbox` unchanged,
/// which under-estimates the footprint of diagonally rotated parts.
pub fn rotate_bounding_box(bbox: &BoundingBox, degrees: f64) -> BoundingBox {
    let angle = normalize_degrees(degrees);
    if angle == 90.0 || angle == 270.0 {
        BoundingBox::from_size(bbox.height, bbox.width)
    } else {
        *bbox
    }
}

/// Rotates a bounding box and returns the axis-aligned box of the result,
/// anchored at the origin.
///
/// Multiples of 90° are handled without trigonometry so sizes stay exact.
pub fn rotate_bounding_box_exact(bbox: &BoundingBox, degrees: f64) -> BoundingBox {
    let angle = normalize_degrees(degrees);
    if angle % 90.0 == 0.0 {
        return if angle == 90.0 || angle == 270.0 {
            BoundingBox::from_size(bbox.height, bbox.width)
        } else {
            BoundingBox::from_size(bbox.width, bbox.height)
        };
    }

    let rotation = Rotation2::new(angle.to_radians());
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(bbox.width, 0.0),
        Point2::new(bbox.width, bbox.height),
        Point2::new(0.0, bbox.height),
    ]
    .map(|corner| {
        let p = rotation * corner;
        Point::new(p.x, p.y)
    });

    match BoundingBox::from_points(&corners) {
        Some(rotated) => BoundingBox::from_size(rotated.width, rotated.height),
        None => *bbox,
    }
}

/// Returns true if two boxes placed at `pos1`/`pos2` come closer than
/// `spacing` on both axes.
///
/// Positions are the top-left corners of the boxes; only sizes are read
/// from the boxes themselves.
pub fn check_bounding_box_collision(
    bbox1: &BoundingBox,
    pos1: &Point,
    bbox2: &BoundingBox,
    pos2: &Point,
    spacing: f64,
) -> bool {
    let separated = pos1.x + bbox1.width + spacing <= pos2.x
        || pos2.x + bbox2.width + spacing <= pos1.x
        || pos1.y + bbox1.height + spacing <= pos2.y
        || pos2.y + bbox2.height + spacing <= pos1.y;
    !separated
}
