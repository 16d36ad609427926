//! Draw-buffer construction: periodic wrapping and spatial trimming.
//!
//! Turns one network snapshot into the point/segment set a display backend
//! can draw. Node positions are wrapped to their minimum image about the
//! cell centre. Segment endpoints get a second wrap: each neighbour is
//! wrapped about the *already wrapped* node position, not the centre, so a
//! segment whose node sits near a box face keeps both endpoints together
//! instead of producing a spurious full-box-length line.

use nalgebra::Vector3;

use slipnet_core::network::DisNetwork;

/// Drawable representation of one snapshot. Ephemeral: rebuilt every tick.
#[derive(Debug, Clone)]
pub struct DrawBuffer {
    /// One wrapped position per node, in node insertion order.
    pub points: Vec<[f64; 3]>,
    /// Wrapped endpoint pairs of the segments that survived trimming.
    pub segments: Vec<[[f64; 3]; 2]>,
    /// Axis-aligned display bounds: `[low corner, high corner]`.
    pub bounds: [[f64; 3]; 2],
}

/// Build the draw buffer for one snapshot.
///
/// Bounds are `centre ± ½·diag(h)`, which matches the cell exactly for
/// diagonal edge matrices; for non-diagonal cells the box is an
/// approximation used only for trimming and axis limits (the wrap itself is
/// exact). With `trim` set, a segment is kept iff the axis-aligned bounding
/// box of its two wrapped endpoints lies entirely within the bounds on all
/// three axes; otherwise every segment is kept.
pub fn build_draw_buffer(network: &DisNetwork, draw_links: bool, trim: bool) -> DrawBuffer {
    let cell = network.cell();
    let centre = cell.center();
    let half_diag = 0.5 * cell.h().diagonal();
    let low = centre - half_diag;
    let high = centre + half_diag;
    let bounds = [[low.x, low.y, low.z], [high.x, high.y, high.z]];

    let node_positions: Vec<Vector3<f64>> =
        network.all_nodes().map(|(_, attr)| attr.position).collect();
    let points: Vec<[f64; 3]> = cell
        .closest_images(&centre, &node_positions)
        .into_iter()
        .map(|wrapped| [wrapped.x, wrapped.y, wrapped.z])
        .collect();

    let mut segments = Vec::new();
    if draw_links {
        for (tag, attr) in network.all_nodes() {
            let anchor = cell.closest_image(&centre, &attr.position);
            for (neighbor, _) in network.neighbors(tag) {
                let far = network
                    .node(neighbor)
                    .expect("link endpoints are validated at snapshot construction");
                let wrapped = cell.closest_image(&anchor, &far.position);
                if !trim || segment_in_bounds(&anchor, &wrapped, &low, &high) {
                    segments.push([
                        [anchor.x, anchor.y, anchor.z],
                        [wrapped.x, wrapped.y, wrapped.z],
                    ]);
                }
            }
        }
    }

    DrawBuffer {
        points,
        segments,
        bounds,
    }
}

fn segment_in_bounds(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    low: &Vector3<f64>,
    high: &Vector3<f64>,
) -> bool {
    (0..3).all(|axis| {
        a[axis].min(b[axis]) >= low[axis] && a[axis].max(b[axis]) <= high[axis]
    })
}
