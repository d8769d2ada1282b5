//! Integration tests for lasernest-d2.

use std::sync::Arc;

use approx::assert_relative_eq;
use lasernest_core::geom::{
    check_bounding_box_collision, is_contour_closed, DEFAULT_CLOSURE_TOLERANCE,
};
use lasernest_d2::{
    calculate_nesting, extract_closed_contours, group_contours_into_parts, nest_records,
    parts_from_records, Entity, Error, Nester2D, NestingConfig, NestingResult, Part, Point,
    RawPoint, RawRecord, RotationModel, Solver, Strategy,
};

fn lcg(seed: &mut u64) -> f64 {
    *seed = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    (*seed >> 33) as f64
}

/// Deterministic mixed-size rectangles, some of them too big for one sheet
/// together.
fn sample_parts(n: usize) -> Vec<Part> {
    let mut seed: u64 = 0x2545_f491;
    (0..n)
        .map(|i| {
            let w = 50.0 + lcg(&mut seed) % 600.0;
            let h = 30.0 + lcg(&mut seed) % 900.0;
            Part::rectangle(format!("part-{i}"), w, h)
        })
        .collect()
}

fn configs() -> Vec<NestingConfig> {
    vec![
        NestingConfig::default(),
        NestingConfig::for_thickness(5.0)
            .with_spacing(3.0)
            .with_margin(0.0),
        NestingConfig::new()
            .with_sheet_size(800.0, 600.0)
            .with_rotations_deg(vec![0.0, 30.0, 90.0])
            .with_rotation_model(RotationModel::Exact),
    ]
}

fn assert_layout_invariants(result: &NestingResult, config: &NestingConfig, input: usize) {
    assert_eq!(result.placed_count() + result.unplaced_count(), input);

    let margin = config.edge_margin;
    for p in &result.placed_parts {
        assert!(p.x >= margin, "{} x={} below margin", p.part.id, p.x);
        assert!(p.y >= margin, "{} y={} below margin", p.part.id, p.y);
        assert!(p.x + p.bounding_box.width + margin <= config.max_sheet_width);
        assert!(p.y + p.bounding_box.height + margin <= config.max_sheet_height);
    }

    for (i, a) in result.placed_parts.iter().enumerate() {
        for b in &result.placed_parts[i + 1..] {
            assert!(
                !check_bounding_box_collision(
                    &a.bounding_box,
                    &a.position(),
                    &b.bounding_box,
                    &b.position(),
                    config.min_spacing,
                ),
                "{} overlaps {}",
                a.part.id,
                b.part.id
            );
        }
    }

    assert!(result.sheet_width <= config.max_sheet_width);
    assert!(result.sheet_height <= config.max_sheet_height);
    let expected_pierces: usize = result
        .placed_parts
        .iter()
        .map(|p| 1 + p.part.inner_contours.len())
        .sum();
    assert_eq!(result.pierce_points, expected_pierces);
}

mod nesting_tests {
    use super::*;

    #[test]
    fn test_layout_invariants_every_strategy() {
        let parts = sample_parts(25);
        let shared: Vec<Arc<Part>> = parts.iter().cloned().map(Arc::new).collect();
        for config in configs() {
            let nester = Nester2D::new(config.clone());
            for strategy in Strategy::ALL {
                let result = nester.pack(&shared, strategy);
                assert_eq!(result.strategy, strategy);
                assert_layout_invariants(&result, &config, parts.len());
            }
        }
    }

    #[test]
    fn test_ranking_monotonic() {
        let parts = sample_parts(25);
        for config in configs() {
            let results = calculate_nesting(&parts, &config).unwrap();
            assert_eq!(results.len(), 3);
            for pair in results.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(a.placed_count() >= b.placed_count());
                if a.placed_count() == b.placed_count() {
                    assert!(a.efficiency >= b.efficiency);
                }
            }
            for result in &results {
                assert_layout_invariants(result, &config, parts.len());
            }
        }
    }

    #[test]
    fn test_oversized_part_never_placed() {
        let config = NestingConfig::default();
        let parts = vec![
            Arc::new(Part::rectangle("part-0", 2600.0, 2600.0)),
            Arc::new(Part::rectangle("part-1", 100.0, 100.0)),
        ];
        let nester = Nester2D::new(config);
        for strategy in Strategy::ALL {
            let result = nester.pack(&parts, strategy);
            assert!(result.placed_parts.iter().all(|p| p.part.id != "part-0"));
            assert!(result.unplaced_parts.iter().any(|p| p.id == "part-0"));
            assert_eq!(result.placed_count(), 1);
        }
    }

    #[test]
    fn test_empty_drawing() {
        assert!(calculate_nesting(&[], &NestingConfig::default())
            .unwrap()
            .is_empty());
        let records = vec![RawRecord::new("TEXT")];
        assert!(nest_records(&records, &NestingConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_two_unit_squares() {
        let parts = vec![
            Part::rectangle("part-0", 1.0, 1.0),
            Part::rectangle("part-1", 1.0, 1.0),
        ];
        let config = NestingConfig::default();
        let results = calculate_nesting(&parts, &config).unwrap();
        for result in &results {
            assert_eq!(result.placed_count(), 2);
            assert!(result.all_placed());
            assert!(result.efficiency > 0.0);
            assert_layout_invariants(result, &config, 2);
        }
    }

    #[test]
    fn test_parallel_same_ranking() {
        let parts = sample_parts(15);
        let config = NestingConfig::default();
        let sequential = Nester2D::new(config.clone()).solve(&parts).unwrap();
        let parallel = Nester2D::new(config)
            .with_parallel(true)
            .solve(&parts)
            .unwrap();
        let strategies = |r: &[NestingResult]| r.iter().map(|x| x.strategy).collect::<Vec<_>>();
        assert_eq!(strategies(&sequential), strategies(&parallel));
        assert_eq!(sequential, parallel);
    }
}

mod grouping_tests {
    use super::*;

    #[test]
    fn test_partition_completeness() {
        let contours = vec![
            Entity::rectangle(0.0, 0.0, 300.0, 200.0),
            Entity::circle(Point::new(50.0, 50.0), 20.0),
            Entity::circle(Point::new(150.0, 100.0), 30.0),
            Entity::rectangle(500.0, 0.0, 100.0, 100.0),
            Entity::rectangle(520.0, 20.0, 10.0, 10.0),
            Entity::circle(Point::new(1000.0, 1000.0), 75.0),
            Entity::ellipse(Point::new(2000.0, 0.0), Point::new(60.0, 0.0), 0.5),
        ];
        let parts = group_contours_into_parts(&contours);
        let assigned: usize = parts.iter().map(|p| 1 + p.inner_contours.len()).sum();
        assert_eq!(assigned, contours.len());
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].hole_count(), 2);
    }

    #[test]
    fn test_single_circle() {
        let circle = Entity::circle(Point::new(0.0, 0.0), 50.0);
        assert!(is_contour_closed(&circle, DEFAULT_CLOSURE_TOLERANCE));
        let parts = group_contours_into_parts(&[circle]);
        assert_eq!(parts.len(), 1);
        assert_relative_eq!(parts[0].area, 7853.98, epsilon = 0.01);
        assert!(parts[0].inner_contours.is_empty());
    }

    #[test]
    fn test_closure_idempotent() {
        let entities = [
            Entity::polyline(
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(5.0, 0.0),
                    Point::new(0.2, 0.3),
                ],
                false,
            ),
            Entity::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            Entity::spline(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)], true),
        ];
        for entity in &entities {
            let first = is_contour_closed(entity, DEFAULT_CLOSURE_TOLERANCE);
            assert_eq!(first, is_contour_closed(entity, DEFAULT_CLOSURE_TOLERANCE));
        }
    }
}

mod pipeline_tests {
    use super::*;

    fn rp(x: f64, y: f64) -> RawPoint {
        RawPoint::new(x, y)
    }

    fn square_with_hole() -> Vec<RawRecord> {
        vec![
            RawRecord {
                vertices: Some(vec![
                    rp(0.0, 0.0),
                    rp(100.0, 0.0),
                    rp(100.0, 100.0),
                    rp(0.0, 100.0),
                ]),
                shape: Some(true),
                ..RawRecord::new("LWPOLYLINE")
            },
            RawRecord {
                center: Some(rp(50.0, 50.0)),
                radius: Some(10.0),
                ..RawRecord::new("CIRCLE")
            },
            RawRecord {
                vertices: Some(vec![rp(0.0, 150.0), rp(100.0, 150.0)]),
                ..RawRecord::new("LINE")
            },
        ]
    }

    #[test]
    fn test_square_with_hole_pipeline() {
        let records = square_with_hole();
        assert_eq!(extract_closed_contours(&records).len(), 2);

        let parts = parts_from_records(&records);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].inner_contours.len(), 1);

        let results = nest_records(&records, &NestingConfig::default()).unwrap();
        assert_eq!(results[0].pierce_points, 2);
        assert_relative_eq!(results[0].sheet_width, 120.0);
        assert_relative_eq!(results[0].used_area, 0.01);
    }

    #[test]
    fn test_three_dimensional_drawing_rejected() {
        let mut records = square_with_hole();
        records.push(RawRecord {
            vertices: Some(vec![
                RawPoint::with_z(0.0, 0.0, 0.0),
                RawPoint::with_z(0.0, 0.0, 25.0),
            ]),
            ..RawRecord::new("LINE")
        });
        assert!(matches!(
            nest_records(&records, &NestingConfig::default()),
            Err(Error::InvalidGeometry(_))
        ));

        // contours alone are still extracted
        assert_eq!(parts_from_records(&records).len(), 1);

        let solid = vec![RawRecord::new("3DFACE")];
        assert!(nest_records(&solid, &NestingConfig::default()).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_pipeline() {
        let json = r#"{"entities": [
            {"type": "CIRCLE", "center": {"x": 0, "y": 0, "z": 0}, "radius": 50, "handle": "2A"},
            {"type": "ARC", "center": {"x": 0, "y": 0}, "radius": 5,
             "startAngle": 0, "endAngle": 1.5},
            {"type": "DIMENSION"}
        ]}"#;
        let records = lasernest_d2::parse_records(json).unwrap();
        let results = lasernest_d2::nest_records_for_thickness(&records, 4.0).unwrap();
        let best = &results[0];
        assert_eq!(best.placed_count(), 1);
        let source = &best.placed_parts[0].part.outer_contour.source;
        assert_eq!(source.handle.as_deref(), Some("2A"));
        assert_relative_eq!(best.sheet_area, 0.0144);
    }
}
