//! # Slipnet Core
//!
//! Data model for discrete dislocation network simulation. This crate holds
//! the pieces every other Slipnet crate builds on: the periodic simulation
//! cell, the node/link network snapshot, and the contracts the geometry core
//! shares with the time-stepping engine.
//!
//! ## Architecture
//!
//! A [`cell::Cell`] is created once per simulation and never mutated; node
//! positions move inside it. A [`network::DisNetwork`] is a consistent
//! point-in-time snapshot of the node/link set — renderers and generators
//! only read or construct networks, never mutate them in place. The engine
//! that actually evolves a network is opaque to this crate and enters only
//! through the [`engine::NetworkDriver`] trait.
//!
//! ## Modules
//!
//! - [`cell`] — Periodic simulation cell and minimum-image projection.
//! - [`network`] — Node/link snapshot with read-only accessors.
//! - [`state`] — Typed shared simulation state.
//! - [`engine`] — Driver contract and mode-selection enums.

pub mod cell;
pub mod engine;
pub mod network;
pub mod state;
