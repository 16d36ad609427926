//! Per-tick render entry point.

use std::time::Duration;

use slipnet_core::network::DisNetwork;
use slipnet_core::state::SimulationState;

use crate::backend::{create_backend, BackendKind, DisplayBackend, HeadlessBackend};
use crate::buffer::build_draw_buffer;

/// Per-call rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Draw segments as well as nodes.
    pub draw_links: bool,
    /// Drop segments whose wrapped bounding box leaves the cell bounds.
    pub trim: bool,
    /// Block until the user acknowledges the frame.
    pub blocking: bool,
    /// Animation throttle applied after each presented frame.
    pub pause: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            draw_links: true,
            trim: false,
            blocking: false,
            pause: Duration::from_millis(10),
        }
    }
}

/// Summary of one presented frame, returned for reuse by the caller.
#[derive(Debug, Clone, Copy)]
pub struct DrawStats {
    pub points: usize,
    pub segments: usize,
    pub bounds: [[f64; 3]; 2],
}

/// Renders network snapshots through a pluggable display backend.
///
/// The renderer never mutates the network or the cell; the only state it
/// writes is the bounds bookkeeping field it owns in [`SimulationState`].
pub struct NetworkRenderer {
    backend: Box<dyn DisplayBackend>,
}

impl NetworkRenderer {
    /// Renderer with an auto-detected backend.
    pub fn new() -> Self {
        Self {
            backend: create_backend("auto"),
        }
    }

    /// Renderer with an explicit backend.
    pub fn with_backend(backend: Box<dyn DisplayBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Render one snapshot.
    ///
    /// A backend failure degrades the renderer to headless for the rest of
    /// its life and is reported through the log, never to the caller: the
    /// hosting simulation loop keeps running without a display.
    pub fn render(
        &mut self,
        network: &DisNetwork,
        state: &mut SimulationState,
        options: &RenderOptions,
    ) -> DrawStats {
        let buffer = build_draw_buffer(network, options.draw_links, options.trim);
        state.last_bounds = Some(buffer.bounds);

        if let Err(err) = self.backend.present(&buffer, options) {
            log::warn!("display backend lost ({err}), continuing headless");
            self.backend = Box::new(HeadlessBackend);
        }

        DrawStats {
            points: buffer.points.len(),
            segments: buffer.segments.len(),
            bounds: buffer.bounds,
        }
    }
}

impl Default for NetworkRenderer {
    fn default() -> Self {
        Self::new()
    }
}
