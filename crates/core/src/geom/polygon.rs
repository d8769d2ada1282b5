//! Polygon primitives over vertex lists.

use geo::{Area, Coord, LineString, Polygon};

use crate::geometry::Point;

/// Ray-casting parity test.
///
/// Needs at least three vertices; the ring is treated as implicitly closed.
/// Points exactly on an edge may land on either side.
pub fn is_point_inside_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);

        let crosses = (yi > point.y) != (yj > point.y)
            && point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Unsigned area of an implicitly closed ring.
pub fn area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let ring: Vec<Coord<f64>> = vertices.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::new(ring), vec![]).unsigned_area()
}
