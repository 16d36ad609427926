//! # Slipnet Geometry
//!
//! Initial-configuration geometry for dislocation networks:
//!
//! - **Glide frames** ([`frame`]) — Orthonormal crystallographic frames
//!   built from a Burgers vector and glide-plane normal, fixing the sign and
//!   orientation conventions downstream physics depends on.
//! - **Frank-Read sources** ([`frank_read`]) — The canonical pinned-loop
//!   seed configuration, emitted as a ready-to-simulate network snapshot.

use thiserror::Error;

pub mod frame;
pub mod frank_read;

/// Tolerance below which a vector norm is treated as zero.
pub(crate) const NORMALISE_TOL: f64 = 1e-12;

/// Errors from initial-configuration geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("vector is too short to normalise (|v| = {norm:.3e})")]
    DegenerateVector { norm: f64 },

    #[error("Burgers vector and plane normal are parallel")]
    ParallelVectors,

    #[error("length must be positive (got {0})")]
    NonPositiveLength(f64),

    #[error(transparent)]
    Cell(#[from] slipnet_core::cell::CellError),

    #[error(transparent)]
    Network(#[from] slipnet_core::network::NetworkError),
}
