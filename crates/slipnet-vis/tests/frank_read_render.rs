//! End-to-end: build a Frank-Read source and render it headless.

use nalgebra::Vector3;
use slipnet_geometry::frank_read::{frank_read_source, FrankReadConfig};
use slipnet_vis::buffer::build_draw_buffer;

fn bcc_source() -> FrankReadConfig {
    FrankReadConfig {
        arm_length: 125.0,
        box_length: 1000.0,
        burgers: Vector3::new(1.0, 1.0, 1.0) / 3f64.sqrt(),
        plane_normal: Vector3::new(1.0, -1.0, 0.0),
        periodic: true,
    }
}

#[test]
fn test_source_renders_five_points_and_segments() {
    let (network, _) = frank_read_source(&bcc_source()).unwrap();
    let buffer = build_draw_buffer(&network, true, false);

    assert_eq!(buffer.points.len(), 5);
    assert_eq!(buffer.segments.len(), 5);
    assert_eq!(buffer.bounds, [[0.0; 3], [1000.0; 3]]);
}

#[test]
fn test_source_is_interior_so_trim_keeps_everything() {
    // the loop is centred in the cell and far from every face; trimming
    // must be a no-op
    let (network, _) = frank_read_source(&bcc_source()).unwrap();
    let buffer = build_draw_buffer(&network, true, true);

    assert_eq!(buffer.segments.len(), 5);
    for segment in &buffer.segments {
        for endpoint in segment {
            for axis in 0..3 {
                assert!(endpoint[axis] >= 0.0 && endpoint[axis] <= 1000.0);
            }
        }
    }
}

#[test]
fn test_wrapping_leaves_interior_loop_unchanged() {
    let (network, _) = frank_read_source(&bcc_source()).unwrap();
    let buffer = build_draw_buffer(&network, false, false);

    for ((_, attr), point) in network.all_nodes().zip(&buffer.points) {
        for axis in 0..3 {
            assert!((attr.position[axis] - point[axis]).abs() < 1e-9);
        }
    }
}
