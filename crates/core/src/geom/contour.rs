//! Per-entity contour queries: closure, bounds, center, containment, area.

use std::f64::consts::PI;

use crate::geom::polygon;
use crate::geometry::{BoundingBox, Entity, Point, Shape};

/// Default endpoint distance (drawing units) under which a polyline or spline
/// counts as closed.
pub const DEFAULT_CLOSURE_TOLERANCE: f64 = 1.0;

/// Returns true if the entity describes a closed contour.
///
/// Circles and ellipses are always closed; lines and arcs never are.
/// Polylines and splines are closed when flagged so, or when they have at
/// least three points and the first and last are within `tolerance`.
pub fn is_contour_closed(entity: &Entity, tolerance: f64) -> bool {
    match &entity.shape {
        Shape::Circle { .. } | Shape::Ellipse { .. } => true,
        Shape::Line { .. } | Shape::Arc { .. } => false,
        Shape::Polyline { vertices, closed } => *closed || endpoints_meet(vertices, tolerance),
        Shape::Spline {
            control_points,
            closed,
        } => *closed || endpoints_meet(control_points, tolerance),
    }
}

fn endpoints_meet(points: &[Point], tolerance: f64) -> bool {
    if points.len() < 3 {
        return false;
    }
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => first.distance_to(last) <= tolerance,
        _ => false,
    }
}

/// Semi-axes `(a, b)` of an ellipse. Rotation of the major axis is ignored.
pub fn ellipse_semi_axes(major_axis_end: &Point, axis_ratio: f64) -> (f64, f64) {
    let a = major_axis_end.x.hypot(major_axis_end.y);
    (a, (a * axis_ratio).abs())
}

fn circle_bounds(center: &Point, radius: f64) -> Option<BoundingBox> {
    if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
        return None;
    }
    Some(BoundingBox::from_bounds(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    ))
}

/// Axis-aligned bounds of an entity.
///
/// Ellipses ignore the major axis rotation and splines use their control
/// points, so both can over-approximate. Returns `None` when the entity has
/// no usable finite bounds or collapses to a single point.
pub fn entity_bounding_box(entity: &Entity) -> Option<BoundingBox> {
    let bbox = match &entity.shape {
        Shape::Line { vertices } => BoundingBox::from_points(vertices.iter()),
        Shape::Polyline { vertices, .. } => BoundingBox::from_points(vertices),
        Shape::Circle { center, radius } | Shape::Arc { center, radius, .. } => {
            circle_bounds(center, *radius)
        }
        Shape::Ellipse {
            center,
            major_axis_end,
            axis_ratio,
            ..
        } => {
            let (a, b) = ellipse_semi_axes(major_axis_end, *axis_ratio);
            Some(BoundingBox::from_bounds(center.x - a, center.y - b, center.x + a, center.y + b))
        }
        Shape::Spline { control_points, .. } => BoundingBox::from_points(control_points),
    }?;

    if !bbox.is_finite() || (bbox.width == 0.0 && bbox.height == 0.0) {
        return None;
    }
    Some(bbox)
}

/// Bounding-box center of an entity (not the area centroid).
pub fn contour_center(entity: &Entity) -> Option<Point> {
    entity_bounding_box(entity).map(|bbox| bbox.center())
}

/// Returns true if `point` lies inside the contour.
///
/// Circles use an exact distance test, polylines ray casting, ellipses the
/// axis-aligned quadratic form. Every other shape falls back to inclusive
/// bounding-box containment.
pub fn is_point_inside_contour(point: &Point, entity: &Entity) -> bool {
    match &entity.shape {
        Shape::Circle { center, radius } => point.distance_to(center) <= *radius,
        Shape::Polyline { vertices, .. } => polygon::is_point_inside_polygon(point, vertices),
        Shape::Ellipse {
            center,
            major_axis_end,
            axis_ratio,
            ..
        } => {
            let (a, b) = ellipse_semi_axes(major_axis_end, *axis_ratio);
            if a == 0.0 || b == 0.0 {
                return false;
            }
            let dx = point.x - center.x;
            let dy = point.y - center.y;
            (dx * dx) / (a * a) + (dy * dy) / (b * b) <= 1.0
        }
        _ => entity_bounding_box(entity).is_some_and(|bbox| bbox.contains(point)),
    }
}

/// Approximate enclosed area in drawing units squared.
///
/// Partial ellipses are counted whole; lines, arcs, splines and short
/// polylines use their bounding-box area.
pub fn contour_area(entity: &Entity) -> f64 {
    match &entity.shape {
        Shape::Circle { radius, .. } => PI * radius * radius,
        Shape::Ellipse {
            major_axis_end,
            axis_ratio,
            ..
        } => {
            let (a, b) = ellipse_semi_axes(major_axis_end, *axis_ratio);
            PI * a * b
        }
        Shape::Polyline { vertices, .. } if vertices.len() >= 3 => polygon::area(vertices),
        _ => entity_bounding_box(entity).map_or(0.0, |bbox| bbox.area()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn open_triangle(gap: f64) -> Entity {
        Entity::polyline(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 8.0),
                Point::new(gap, 0.0),
            ],
            false,
        )
    }

    #[test]
    fn test_closure_by_type() {
        let c = Point::new(0.0, 0.0);
        assert!(is_contour_closed(&Entity::circle(c, 5.0), DEFAULT_CLOSURE_TOLERANCE));
        assert!(is_contour_closed(
            &Entity::ellipse(c, Point::new(10.0, 0.0), 0.5),
            DEFAULT_CLOSURE_TOLERANCE
        ));
        assert!(!is_contour_closed(&Entity::arc(c, 5.0, 0.0, PI), DEFAULT_CLOSURE_TOLERANCE));
        assert!(!is_contour_closed(
            &Entity::line(c, Point::new(1.0, 1.0)),
            DEFAULT_CLOSURE_TOLERANCE
        ));
    }

    #[test]
    fn test_polyline_closure_tolerance() {
        assert!(is_contour_closed(&open_triangle(0.5), DEFAULT_CLOSURE_TOLERANCE));
        assert!(is_contour_closed(&open_triangle(1.0), DEFAULT_CLOSURE_TOLERANCE));
        assert!(!is_contour_closed(&open_triangle(1.5), DEFAULT_CLOSURE_TOLERANCE));
        assert!(is_contour_closed(&open_triangle(1.5), 2.0));
    }

    #[test]
    fn test_polyline_closure_needs_three_points() {
        let two = Entity::polyline(vec![Point::new(0.0, 0.0), Point::new(0.0, 0.5)], false);
        assert!(!is_contour_closed(&two, DEFAULT_CLOSURE_TOLERANCE));

        let flagged = Entity::polyline(vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)], true);
        assert!(is_contour_closed(&flagged, DEFAULT_CLOSURE_TOLERANCE));
    }

    #[test]
    fn test_spline_closure() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.2, 0.2),
        ];
        assert!(is_contour_closed(
            &Entity::spline(pts.clone(), false),
            DEFAULT_CLOSURE_TOLERANCE
        ));
        assert!(is_contour_closed(
            &Entity::spline(pts[..3].to_vec(), true),
            DEFAULT_CLOSURE_TOLERANCE
        ));
        assert!(!is_contour_closed(
            &Entity::spline(pts[..3].to_vec(), false),
            DEFAULT_CLOSURE_TOLERANCE
        ));
    }

    #[test]
    fn test_closure_is_pure() {
        let e = open_triangle(0.9);
        let first = is_contour_closed(&e, DEFAULT_CLOSURE_TOLERANCE);
        assert_eq!(first, is_contour_closed(&e, DEFAULT_CLOSURE_TOLERANCE));
    }

    #[test]
    fn test_nan_vertices_are_open() {
        let e = Entity::polyline(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(f64::NAN, 0.0),
            ],
            false,
        );
        assert!(!is_contour_closed(&e, DEFAULT_CLOSURE_TOLERANCE));
        assert!(entity_bounding_box(&e).is_none());
    }

    #[test]
    fn test_bbox_circle_and_arc() {
        let bbox = entity_bounding_box(&Entity::circle(Point::new(10.0, 20.0), 5.0)).unwrap();
        assert_relative_eq!(bbox.min_x, 5.0);
        assert_relative_eq!(bbox.max_y, 25.0);
        assert_relative_eq!(bbox.width, 10.0);

        // arcs report the full circle
        let arc = entity_bounding_box(&Entity::arc(Point::new(0.0, 0.0), 3.0, 0.0, 1.0)).unwrap();
        assert_relative_eq!(arc.width, 6.0);
        assert_relative_eq!(arc.height, 6.0);
    }

    #[test]
    fn test_bbox_ellipse_ignores_rotation() {
        let e = Entity::ellipse(Point::new(0.0, 0.0), Point::new(0.0, 10.0), 0.5);
        let bbox = entity_bounding_box(&e).unwrap();
        assert_relative_eq!(bbox.width, 20.0);
        assert_relative_eq!(bbox.height, 10.0);
    }

    #[test]
    fn test_bbox_degenerate() {
        assert!(entity_bounding_box(&Entity::circle(Point::new(1.0, 1.0), 0.0)).is_none());
        assert!(entity_bounding_box(&Entity::circle(Point::new(1.0, 1.0), -2.0)).is_none());
        assert!(entity_bounding_box(&Entity::polyline(vec![], true)).is_none());
        let far = Entity::circle(Point::new(f64::INFINITY, 0.0), 1.0);
        assert!(entity_bounding_box(&far).is_none());
        assert!(contour_center(&Entity::polyline(vec![], true)).is_none());
    }

    #[test]
    fn test_center() {
        let rect = Entity::rectangle(10.0, 10.0, 20.0, 40.0);
        assert_eq!(contour_center(&rect), Some(Point::new(20.0, 30.0)));
    }

    #[test]
    fn test_point_inside_circle() {
        let c = Entity::circle(Point::new(0.0, 0.0), 10.0);
        assert!(is_point_inside_contour(&Point::new(10.0, 0.0), &c));
        assert!(!is_point_inside_contour(&Point::new(7.5, 7.5), &c));
    }

    #[test]
    fn test_point_inside_ellipse() {
        let e = Entity::ellipse(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 0.5);
        assert!(is_point_inside_contour(&Point::new(19.0, 0.0), &e));
        assert!(!is_point_inside_contour(&Point::new(0.0, 11.0), &e));
    }

    #[test]
    fn test_point_inside_spline_uses_bbox() {
        let s = Entity::spline(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
            ],
            true,
        );
        // outside the control triangle but inside its box
        assert!(is_point_inside_contour(&Point::new(9.0, 9.0), &s));
        assert!(!is_point_inside_contour(&Point::new(11.0, 1.0), &s));
    }

    #[test]
    fn test_area() {
        let circle = Entity::circle(Point::new(0.0, 0.0), 50.0);
        assert_relative_eq!(contour_area(&circle), 7853.981633974483, epsilon = 1e-9);

        let ellipse = Entity::ellipse(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.5);
        assert_relative_eq!(contour_area(&ellipse), PI * 50.0, epsilon = 1e-9);

        let rect = Entity::rectangle(0.0, 0.0, 100.0, 100.0);
        assert_relative_eq!(contour_area(&rect), 10_000.0);

        let triangle = Entity::polyline(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ],
            true,
        );
        assert_relative_eq!(contour_area(&triangle), 50.0);

        let spline = Entity::spline(
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 3.0),
            ],
            true,
        );
        assert_relative_eq!(contour_area(&spline), 12.0);
    }
}
