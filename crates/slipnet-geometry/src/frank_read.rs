//! Frank-Read source construction.
//!
//! Builds the canonical pinned-loop configuration used to seed dislocation
//! simulations: a five-node polygon on the glide plane, pinned at both arm
//! ends and along the closing path, free only at the midpoint, connected in
//! a cycle. Node coordinates are laid out in the glide frame (Burgers
//! direction along x, line along y, plane normal along z) and translated to
//! the cell centre.

use nalgebra::Vector3;

use slipnet_core::cell::Cell;
use slipnet_core::network::{Constraint, DisNetwork, Link, LinkAttr, NodeAttr, NodeTag};

use crate::frame::GlideFrame;
use crate::{GeometryError, NORMALISE_TOL};

/// Parameters for [`frank_read_source`].
#[derive(Debug, Clone)]
pub struct FrankReadConfig {
    /// Length of the pinned source arm (b).
    pub arm_length: f64,
    /// Edge length of the cubic simulation cell (b).
    pub box_length: f64,
    /// Burgers vector in laboratory coordinates.
    pub burgers: Vector3<f64>,
    /// Glide-plane normal in laboratory coordinates.
    pub plane_normal: Vector3<f64>,
    /// Apply periodic boundaries on all three axes.
    pub periodic: bool,
}

/// Build an initial Frank-Read source loop.
///
/// Returns the network snapshot together with the glide frame — the crystal
/// orientation that downstream physics keeps in the shared state. Every
/// emitted segment carries the frame-rotated Burgers vector and a unit plane
/// normal `normalize(b × Δr)`, perpendicular by construction to both the
/// Burgers vector and the segment direction.
pub fn frank_read_source(
    config: &FrankReadConfig,
) -> Result<(DisNetwork, GlideFrame), GeometryError> {
    if !(config.arm_length > 0.0) {
        return Err(GeometryError::NonPositiveLength(config.arm_length));
    }
    if !(config.box_length > 0.0) {
        return Err(GeometryError::NonPositiveLength(config.box_length));
    }

    let cell = Cell::cubic(config.box_length, config.periodic)?;
    let frame = GlideFrame::from_burgers_and_normal(&config.burgers, &config.plane_normal)?;
    let burgers = frame.to_frame(&config.burgers);

    let half = 0.5 * config.arm_length;
    let arm = config.arm_length;
    let layout = [
        (Vector3::new(0.0, -half, 0.0), Constraint::Pinned),
        (Vector3::new(0.0, 0.0, 0.0), Constraint::Unconstrained),
        (Vector3::new(0.0, half, 0.0), Constraint::Pinned),
        (Vector3::new(0.0, half, -arm), Constraint::Pinned),
        (Vector3::new(0.0, -half, -arm), Constraint::Pinned),
    ];

    let centre = cell.center();
    let nodes: Vec<(NodeTag, NodeAttr)> = layout
        .iter()
        .enumerate()
        .map(|(tag, (position, constraint))| {
            (
                tag,
                NodeAttr {
                    position: position + centre,
                    constraint: *constraint,
                },
            )
        })
        .collect();

    let count = nodes.len();
    let mut links = Vec::with_capacity(count);
    for i in 0..count {
        let j = (i + 1) % count;
        let direction = nodes[j].1.position - nodes[i].1.position;
        let cross = burgers.cross(&direction);
        let plane_normal = cross
            .try_normalize(NORMALISE_TOL)
            .ok_or(GeometryError::DegenerateVector { norm: cross.norm() })?;
        links.push(Link {
            source: i,
            target: j,
            attr: LinkAttr {
                burgers,
                plane_normal,
            },
        });
    }

    let network = DisNetwork::new(cell, nodes, links)?;
    Ok((network, frame))
}
