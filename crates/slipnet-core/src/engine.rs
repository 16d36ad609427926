//! Contracts consumed from the simulation engine.
//!
//! The geometry core does not evolve a network; it hands it to an opaque
//! driver behind [`NetworkDriver`]. The driver's collaborators — force
//! model, mobility law, integrator, topology, collision, remesh — are
//! selected once at construction from the closed enums below rather than
//! from free-form mode strings, so an unknown mode is a compile error, not
//! a runtime surprise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::DisNetwork;
use crate::state::SimulationState;

/// Errors surfaced by a driver run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("driver step {step} failed: {reason}")]
    StepFailed { step: usize, reason: String },
}

/// Nodal force model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceMode {
    LineTension,
}

/// Mobility law relating force to node velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityLaw {
    SimpleGlide,
    BccGlide,
}

/// Time integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    EulerForward,
}

/// Collision detection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    Proximity,
}

/// Remeshing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemeshRule {
    LengthBased,
}

/// Node-split selection used by topology changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    MaxDissipation,
}

/// What a driver run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
}

/// Entry point of a time-stepping engine.
///
/// Implementations own their collaborators and invoke the renderer
/// periodically; the caller supplies the network and the shared state.
pub trait NetworkDriver {
    fn run(
        &mut self,
        network: &mut DisNetwork,
        state: &mut SimulationState,
    ) -> Result<RunSummary, EngineError>;
}
