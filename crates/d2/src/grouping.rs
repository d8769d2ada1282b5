//! Grouping closed contours into parts with holes.

use lasernest_core::geom::{contour_area, entity_bounding_box, is_point_inside_contour};
use lasernest_core::{BoundingBox, Entity, Part};
use log::{debug, info};

struct Candidate<'a> {
    entity: &'a Entity,
    bounding_box: BoundingBox,
    area: f64,
    index: usize,
}

/// Groups closed contours into parts.
///
/// Contours are visited largest area first. Each contour not yet claimed
/// becomes the outer contour of a new part and claims, as holes, every other
/// unclaimed contour whose bounding-box center lies inside it. Contours
/// without bounds are dropped. Part ids are `part-0`, `part-1`, ... in
/// creation order.
///
/// Containment is tested against the outer contour only, so an island
/// inside a hole still becomes a hole of the outer part.
pub fn group_contours_into_parts(contours: &[Entity]) -> Vec<Part> {
    let mut candidates: Vec<Candidate<'_>> = contours
        .iter()
        .enumerate()
        .filter_map(|(index, entity)| {
            let bounding_box = entity_bounding_box(entity)?;
            Some(Candidate {
                entity,
                bounding_box,
                area: contour_area(entity),
                index,
            })
        })
        .collect();

    // stable: equal areas keep input order
    candidates.sort_by(|a, b| b.area.total_cmp(&a.area));

    let mut used = vec![false; contours.len()];
    let mut parts = Vec::new();

    for outer in &candidates {
        if used[outer.index] {
            continue;
        }

        let mut holes = Vec::new();
        for other in &candidates {
            if other.index == outer.index || used[other.index] {
                continue;
            }
            if is_point_inside_contour(&other.bounding_box.center(), outer.entity) {
                used[other.index] = true;
                holes.push(other.entity.clone());
            }
        }
        used[outer.index] = true;

        let id = format!("part-{}", parts.len());
        debug!(
            "{}: outer {} (record {}) with {} holes",
            id,
            outer.entity.kind(),
            outer.index,
            holes.len()
        );
        parts.push(Part {
            id,
            outer_contour: outer.entity.clone(),
            inner_contours: holes,
            bounding_box: outer.bounding_box,
            area: outer.area,
        });
    }

    info!(
        "Grouped {} contours into {} parts",
        candidates.len(),
        parts.len()
    );
    parts
}
