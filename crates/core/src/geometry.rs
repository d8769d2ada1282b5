//! Geometric data model: points, bounding boxes and drawing entities.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in drawing units (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
///
/// `width` and `height` are stored alongside the bounds because placement
/// code works almost exclusively with sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its bounds.
    ///
    /// Bounds are reordered if given reversed so that `max >= min` holds.
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (min_y, max_y) = if min_y <= max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Creates a box of the given size anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_bounds(0.0, 0.0, width, height)
    }

    /// Smallest box containing all `points`, or `None` when there are no
    /// points or any coordinate is non-finite.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points {
            if !p.is_finite() {
                return None;
            }
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if !min_x.is_finite() {
            return None;
        }
        Some(Self::from_bounds(min_x, min_y, max_x, max_y))
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Area of the box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Perimeter of the box.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns true if all bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

/// Reference back to the raw drawing record an entity was built from.
///
/// Only used for diagnostics; geometry code never reads it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceRef {
    /// Position of the record in the parser output.
    pub index: usize,
    /// Original type tag (e.g. `LWPOLYLINE`).
    pub type_tag: String,
    /// Drawing handle, if the parser reported one.
    pub handle: Option<String>,
    /// Layer name, if the parser reported one.
    pub layer: Option<String>,
}

/// Geometry of a drawing entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Shape {
    /// Straight segment.
    Line { vertices: [Point; 2] },
    /// Polyline; `closed` mirrors the explicit closure flag of the drawing.
    Polyline { vertices: Vec<Point>, closed: bool },
    /// Full circle.
    Circle { center: Point, radius: f64 },
    /// Circular arc, angles in radians.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Ellipse or elliptical arc. `major_axis_end` is relative to `center`.
    Ellipse {
        center: Point,
        major_axis_end: Point,
        axis_ratio: f64,
        start_angle: Option<f64>,
        end_angle: Option<f64>,
    },
    /// Spline, approximated by its control polygon.
    Spline {
        control_points: Vec<Point>,
        closed: bool,
    },
}

impl Shape {
    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Polyline { .. } => "polyline",
            Self::Circle { .. } => "circle",
            Self::Arc { .. } => "arc",
            Self::Ellipse { .. } => "ellipse",
            Self::Spline { .. } => "spline",
        }
    }
}

/// A geometric primitive extracted from a drawing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    /// The geometry.
    pub shape: Shape,
    /// Where the entity came from.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: SourceRef,
}

impl Entity {
    /// Creates an entity without source information.
    pub fn new(shape: Shape) -> Self {
        let type_tag = shape.kind().to_uppercase();
        Self {
            shape,
            source: SourceRef {
                type_tag,
                ..SourceRef::default()
            },
        }
    }

    /// Attaches source information.
    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = source;
        self
    }

    /// Creates a line segment.
    pub fn line(start: Point, end: Point) -> Self {
        Self::new(Shape::Line {
            vertices: [start, end],
        })
    }

    /// Creates a polyline.
    pub fn polyline(vertices: Vec<Point>, closed: bool) -> Self {
        Self::new(Shape::Polyline { vertices, closed })
    }

    /// Creates a closed rectangular polyline with its lower-left corner at `(x, y)`.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::polyline(
            vec![
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ],
            true,
        )
    }

    /// Creates a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(Shape::Circle { center, radius })
    }

    /// Creates a circular arc (angles in radians).
    pub fn arc(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::new(Shape::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Creates a full ellipse.
    pub fn ellipse(center: Point, major_axis_end: Point, axis_ratio: f64) -> Self {
        Self::new(Shape::Ellipse {
            center,
            major_axis_end,
            axis_ratio,
            start_angle: None,
            end_angle: None,
        })
    }

    /// Creates a spline from its control points.
    pub fn spline(control_points: Vec<Point>, closed: bool) -> Self {
        Self::new(Shape::Spline {
            control_points,
            closed,
        })
    }

    /// Short lowercase name of the shape variant.
    pub fn kind(&self) -> &'static str {
        self.shape.kind()
    }
}
