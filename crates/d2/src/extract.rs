//! Raw drawing records and closed-contour extraction.
//!
//! A drawing arrives as a list of loosely typed entity records, the shape
//! produced by common DXF parsers: a `type` tag plus whichever geometric
//! fields that entity kind carries. [`normalize_record`] turns a record into
//! a typed [`Entity`]; [`extract_closed_contours`] keeps the ones that can be
//! cut as closed outlines.

use lasernest_core::geom::{entity_bounding_box, is_contour_closed, DEFAULT_CLOSURE_TOLERANCE};
use lasernest_core::{Entity, Error, Point, Result, Shape, SourceRef};
use log::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest |z| a LINE vertex may have in a flat drawing.
pub const PLANAR_TOLERANCE: f64 = 0.001;

/// Record types that only occur in 3D drawings.
const SOLID_TYPES: [&str; 2] = ["3DFACE", "SOLID"];

/// A coordinate as found in raw records. `z` is kept only to detect 3D
/// drawings; extra fields such as `bulge` are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub z: Option<f64>,
}

impl RawPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    fn is_off_plane(&self) -> bool {
        self.z.is_some_and(|z| z.abs() > PLANAR_TOLERANCE)
    }
}

impl From<RawPoint> for Point {
    fn from(p: RawPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for RawPoint {
    fn from(p: Point) -> Self {
        RawPoint::new(p.x, p.y)
    }
}

/// One entity record of a parsed drawing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RawRecord {
    /// Entity type tag, e.g. `LINE` or `LWPOLYLINE`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub record_type: String,
    pub vertices: Option<Vec<RawPoint>>,
    pub center: Option<RawPoint>,
    pub radius: Option<f64>,
    pub control_points: Option<Vec<RawPoint>>,
    pub start_angle: Option<f64>,
    pub end_angle: Option<f64>,
    /// Closed flag as written by LWPOLYLINE/POLYLINE.
    pub shape: Option<bool>,
    /// Closed flag as written by SPLINE; polylines accept it too.
    pub closed: Option<bool>,
    pub major_axis_end_point: Option<RawPoint>,
    pub axis_ratio: Option<f64>,
    pub handle: Option<String>,
    pub layer: Option<String>,
}

impl RawRecord {
    /// Creates an empty record with the given type tag.
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            ..Default::default()
        }
    }

    /// Closed flag of a polyline, from either `shape` or `closed`.
    pub fn is_polyline_closed(&self) -> bool {
        self.shape.unwrap_or(false) || self.closed.unwrap_or(false)
    }

    /// Closed flag of a spline. Splines ignore `shape`.
    pub fn is_spline_closed(&self) -> bool {
        self.closed.unwrap_or(false)
    }

    /// True for solid/face records and for LINEs leaving the XY plane.
    pub fn is_non_planar(&self) -> bool {
        if SOLID_TYPES.contains(&self.record_type.as_str()) {
            return true;
        }
        self.record_type == "LINE"
            && self
                .vertices
                .as_ref()
                .is_some_and(|v| v.iter().any(RawPoint::is_off_plane))
    }
}

fn points(raw: Option<&Vec<RawPoint>>) -> Vec<Point> {
    raw.map(|v| v.iter().copied().map(Point::from).collect())
        .unwrap_or_default()
}

/// Converts a raw record into a typed entity.
///
/// Returns `None` for unrecognized type tags and for records missing a field
/// their kind cannot do without (a circle without a radius, an ellipse
/// without a major axis, a line with fewer than two vertices).
pub fn normalize_record(index: usize, raw: &RawRecord) -> Option<Entity> {
    let shape = match raw.record_type.as_str() {
        "LINE" => {
            let vertices = points(raw.vertices.as_ref());
            if vertices.len() < 2 {
                return None;
            }
            Shape::Line {
                vertices: [vertices[0], vertices[1]],
            }
        }
        "LWPOLYLINE" | "POLYLINE" => Shape::Polyline {
            vertices: points(raw.vertices.as_ref()),
            closed: raw.is_polyline_closed(),
        },
        "CIRCLE" => Shape::Circle {
            center: raw.center?.into(),
            radius: raw.radius?,
        },
        "ARC" => Shape::Arc {
            center: raw.center?.into(),
            radius: raw.radius?,
            start_angle: raw.start_angle.unwrap_or(0.0),
            end_angle: raw.end_angle.unwrap_or(0.0),
        },
        "ELLIPSE" => Shape::Ellipse {
            center: raw.center?.into(),
            major_axis_end: raw.major_axis_end_point?.into(),
            // a zero, NaN or missing ratio means a circle-like ellipse
            axis_ratio: raw
                .axis_ratio
                .filter(|r| *r != 0.0 && !r.is_nan())
                .unwrap_or(1.0),
            start_angle: raw.start_angle,
            end_angle: raw.end_angle,
        },
        "SPLINE" => Shape::Spline {
            control_points: points(raw.control_points.as_ref()),
            closed: raw.is_spline_closed(),
        },
        _ => return None,
    };

    Some(Entity::new(shape).with_source(SourceRef {
        index,
        type_tag: raw.record_type.clone(),
        handle: raw.handle.clone(),
        layer: raw.layer.clone(),
    }))
}

/// Counters describing one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractionReport {
    /// Records seen.
    pub total: usize,
    /// Records kept as closed contours.
    pub closed: usize,
    /// Recognized records that are not closed.
    pub skipped_open: usize,
    /// Closed records without a usable bounding box.
    pub skipped_unbounded: usize,
    /// Records with an unknown type tag or missing required fields.
    pub skipped_unrecognized: usize,
    /// 3D records: solids, faces and LINEs with a z offset.
    pub non_planar: usize,
}

impl ExtractionReport {
    /// Records dropped for any reason.
    pub fn skipped(&self) -> usize {
        self.skipped_open + self.skipped_unbounded + self.skipped_unrecognized + self.non_planar
    }

    pub fn is_planar(&self) -> bool {
        self.non_planar == 0
    }

    /// Fails with [`Error::InvalidGeometry`] when the drawing had 3D records.
    pub fn ensure_planar(&self) -> Result<()> {
        if self.is_planar() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry(format!(
                "{} of {} records are 3D; only flat 2D drawings can be nested",
                self.non_planar, self.total
            )))
        }
    }
}

/// Keeps the records that form closed contours with a finite bounding box,
/// in input order.
pub fn extract_closed_contours(records: &[RawRecord]) -> Vec<Entity> {
    extract_closed_contours_with_report(records).0
}

/// Same as [`extract_closed_contours`], also returning skip counters.
///
/// 3D records are dropped and counted in [`ExtractionReport::non_planar`].
pub fn extract_closed_contours_with_report(
    records: &[RawRecord],
) -> (Vec<Entity>, ExtractionReport) {
    let mut report = ExtractionReport {
        total: records.len(),
        ..Default::default()
    };
    let mut contours = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        if raw.is_non_planar() {
            debug!("Skipping {} ({}): not planar", index, raw.record_type);
            report.non_planar += 1;
            continue;
        }

        let Some(entity) = normalize_record(index, raw) else {
            debug!("Skipping {} ({:?}): unrecognized", index, raw.record_type);
            report.skipped_unrecognized += 1;
            continue;
        };

        if !is_contour_closed(&entity, DEFAULT_CLOSURE_TOLERANCE) {
            debug!("Skipping {} ({}): open contour", index, raw.record_type);
            report.skipped_open += 1;
            continue;
        }

        if entity_bounding_box(&entity).is_none() {
            debug!("Skipping {} ({}): unbounded", index, raw.record_type);
            report.skipped_unbounded += 1;
            continue;
        }

        contours.push(entity);
    }

    report.closed = contours.len();
    info!(
        "Extracted {} closed contours from {} records ({} skipped)",
        report.closed,
        report.total,
        report.skipped()
    );
    if !report.is_planar() {
        warn!("Drawing has {} 3D records", report.non_planar);
    }

    (contours, report)
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsDocument {
    List(Vec<RawRecord>),
    Drawing { entities: Vec<RawRecord> },
}

/// Parses raw records from JSON: either a bare array of records or an
/// object with an `entities` array.
#[cfg(feature = "serde")]
pub fn parse_records(json: &str) -> Result<Vec<RawRecord>> {
    let document: RecordsDocument =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
    Ok(match document {
        RecordsDocument::List(records) => records,
        RecordsDocument::Drawing { entities } => entities,
    })
}
