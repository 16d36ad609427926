//! Display backend abstraction.
//!
//! Rendering happens behind [`DisplayBackend`] so the draw-buffer logic
//! stays independent of any particular display stack. A missing display is
//! a designed degrade path, not an error the hosting simulation loop should
//! ever see: detection happens once at initialisation, and a backend that
//! fails mid-run is swapped for the headless no-op by the renderer.

use std::io::IsTerminal;

use thiserror::Error;

use crate::buffer::DrawBuffer;
use crate::renderer::RenderOptions;

/// Errors from display backends.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("display backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Identifies a display backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Console,
    Headless,
}

/// Abstraction over display backends.
pub trait DisplayBackend {
    fn kind(&self) -> BackendKind;

    /// Present one draw buffer. A [`RenderError`] return tells the renderer
    /// to degrade to headless; implementations must not panic on a lost
    /// display.
    fn present(&mut self, buffer: &DrawBuffer, options: &RenderOptions) -> Result<(), RenderError>;
}

/// Logs a one-line frame summary per tick and honours the animation pause.
#[derive(Debug, Default)]
pub struct ConsoleBackend;

impl DisplayBackend for ConsoleBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Console
    }

    fn present(&mut self, buffer: &DrawBuffer, options: &RenderOptions) -> Result<(), RenderError> {
        log::info!(
            "frame: {} nodes, {} segments, x [{:.1}, {:.1}] y [{:.1}, {:.1}] z [{:.1}, {:.1}]",
            buffer.points.len(),
            buffer.segments.len(),
            buffer.bounds[0][0],
            buffer.bounds[1][0],
            buffer.bounds[0][1],
            buffer.bounds[1][1],
            buffer.bounds[0][2],
            buffer.bounds[1][2],
        );

        if options.blocking {
            // console analogue of a blocking figure: wait for Enter
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| RenderError::BackendUnavailable(e.to_string()))?;
        }
        if !options.pause.is_zero() {
            std::thread::sleep(options.pause);
        }
        Ok(())
    }
}

/// No-op backend for display-less environments.
#[derive(Debug, Default)]
pub struct HeadlessBackend;

impl DisplayBackend for HeadlessBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Headless
    }

    fn present(
        &mut self,
        _buffer: &DrawBuffer,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Select a backend from a preference string.
///
/// - `"console"` — always the console backend.
/// - `"headless"` — never draw.
/// - `"auto"` (default, and any unrecognised value) — console when standard
///   error is attached to a terminal, headless otherwise.
pub fn create_backend(preference: &str) -> Box<dyn DisplayBackend> {
    match preference {
        "console" => Box::new(ConsoleBackend),
        "headless" => Box::new(HeadlessBackend),
        _ => {
            if std::io::stderr().is_terminal() {
                Box::new(ConsoleBackend)
            } else {
                log::info!("no terminal attached, rendering disabled");
                Box::new(HeadlessBackend)
            }
        }
    }
}
