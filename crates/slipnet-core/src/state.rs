//! Typed shared simulation state.
//!
//! The engine collaborators (force, mobility, integration, topology,
//! collision, remesh) and the renderer all read from one state record. A
//! struct with named, typed fields replaces an untyped keyword map so the
//! schema is agreed at compile time across loosely coupled components. The
//! renderer treats the state as read-only apart from the bounds bookkeeping
//! field it owns.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Crystal structure of the simulated material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrystalStructure {
    Bcc,
    Fcc,
}

/// Mobility coefficients, normalised to the reference drag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MobilityCoefficients {
    pub reference: f64,
    pub edge: f64,
    pub screw: f64,
}

/// Shared simulation state.
///
/// Lengths are in units of the Burgers vector magnitude (b) unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub crystal: CrystalStructure,
    /// Laboratory-frame crystal orientation; rows are the rotated axes.
    pub orientation: Matrix3<f64>,
    /// Physical Burgers vector magnitude (m).
    pub burgers_magnitude: f64,
    /// Shear modulus (Pa).
    pub shear_modulus: f64,
    pub poisson_ratio: f64,
    /// Dislocation core radius.
    pub core_radius: f64,
    /// Remesh upper bound on segment length.
    pub max_segment: f64,
    /// Remesh lower bound on segment length.
    pub min_segment: f64,
    /// Annihilation capture radius.
    pub annihilation_radius: f64,
    pub mobility: MobilityCoefficients,
    /// Applied stress in Voigt order (xx, yy, zz, yz, xz, xy), Pa.
    pub applied_stress: [f64; 6],
    /// Axis bounds last computed by the renderer, written back each tick.
    #[serde(skip)]
    pub last_bounds: Option<[[f64; 3]; 2]>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            crystal: CrystalStructure::Bcc,
            orientation: Matrix3::identity(),
            burgers_magnitude: 3e-10,
            shear_modulus: 50e9,
            poisson_ratio: 0.3,
            core_radius: 1.0,
            max_segment: 40.0,
            min_segment: 10.0,
            annihilation_radius: 3.0,
            mobility: MobilityCoefficients {
                reference: 1.0,
                edge: 1.0,
                screw: 0.1,
            },
            applied_stress: [0.0; 6],
            last_bounds: None,
        }
    }
}
