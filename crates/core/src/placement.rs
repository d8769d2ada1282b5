//! Parts and their placements on a sheet.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::{contour_area, entity_bounding_box};
use crate::geometry::{BoundingBox, Entity, Point};

/// Identifier of a part within one grouping pass (`part-<n>`).
pub type PartId = String;

/// One outer contour plus the holes cut out of it; the atomic nesting unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    /// Unique identifier.
    pub id: PartId,
    /// Outer contour.
    pub outer_contour: Entity,
    /// Holes whose centers lie inside the outer contour.
    pub inner_contours: Vec<Entity>,
    /// Bounds of the outer contour.
    pub bounding_box: BoundingBox,
    /// Area of the outer contour in drawing units squared.
    pub area: f64,
}

impl Part {
    /// Creates a part without holes from an outer contour.
    ///
    /// Returns `None` if the contour has no usable bounding box.
    pub fn from_contour(id: impl Into<PartId>, outer_contour: Entity) -> Option<Self> {
        let bounding_box = entity_bounding_box(&outer_contour)?;
        let area = contour_area(&outer_contour);
        Some(Self {
            id: id.into(),
            outer_contour,
            inner_contours: Vec::new(),
            bounding_box,
            area,
        })
    }

    /// Creates a rectangular part anchored at the origin.
    pub fn rectangle(id: impl Into<PartId>, width: f64, height: f64) -> Self {
        let bounding_box = BoundingBox::from_size(width, height);
        Self {
            id: id.into(),
            outer_contour: Entity::rectangle(0.0, 0.0, width, height),
            inner_contours: Vec::new(),
            area: bounding_box.area(),
            bounding_box,
        }
    }

    /// Adds a hole.
    pub fn with_inner_contour(mut self, contour: Entity) -> Self {
        self.inner_contours.push(contour);
        self
    }

    /// Number of holes.
    pub fn hole_count(&self) -> usize {
        self.inner_contours.len()
    }

    /// Pierces needed to cut this part: one for the outline, one per hole.
    pub fn pierce_points(&self) -> usize {
        1 + self.inner_contours.len()
    }

    /// All contours of the part, outer first.
    pub fn contours(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }
}

/// A part positioned on a sheet.
///
/// `(x, y)` is the top-left corner of the rotated bounding box in sheet
/// coordinates, with the origin at the sheet's top-left corner and Y
/// growing downwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedPart {
    /// The placed part, shared with the input list.
    pub part: Arc<Part>,
    /// X position of the footprint's corner.
    pub x: f64,
    /// Y position of the footprint's corner.
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Footprint after rotation.
    pub bounding_box: BoundingBox,
}

impl PlacedPart {
    /// Creates a new placement.
    pub fn new(
        part: Arc<Part>,
        x: f64,
        y: f64,
        rotation: f64,
        bounding_box: BoundingBox,
    ) -> Self {
        Self {
            part,
            x,
            y,
            rotation,
            bounding_box,
        }
    }

    /// Position of the footprint's corner.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge of the footprint.
    pub fn right(&self) -> f64 {
        self.x + self.bounding_box.width
    }

    /// Bottom edge of the footprint (Y grows downwards).
    pub fn bottom(&self) -> f64 {
        self.y + self.bounding_box.height
    }
}
