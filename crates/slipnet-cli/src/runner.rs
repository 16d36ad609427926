//! Preview runner: ties together the source generator, the renderer, and
//! network export.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use nalgebra::Vector3;

use slipnet_core::engine::{EngineError, NetworkDriver, RunSummary};
use slipnet_core::network::DisNetwork;
use slipnet_core::state::{MobilityCoefficients, SimulationState};
use slipnet_geometry::frank_read::{frank_read_source, FrankReadConfig};
use slipnet_geometry::frame::GlideFrame;
use slipnet_vis::backend::create_backend;
use slipnet_vis::renderer::{NetworkRenderer, RenderOptions};

use crate::config::JobConfig;

/// Drives the renderer for a fixed number of ticks without evolving the
/// network: the preview stand-in for a full time-stepping engine.
pub struct PreviewDriver {
    renderer: NetworkRenderer,
    options: RenderOptions,
    ticks: usize,
}

impl NetworkDriver for PreviewDriver {
    fn run(
        &mut self,
        network: &mut DisNetwork,
        state: &mut SimulationState,
    ) -> Result<RunSummary, EngineError> {
        for _ in 0..self.ticks {
            let stats = self.renderer.render(network, state, &self.options);
            log::debug!(
                "presented {} points, {} segments",
                stats.points,
                stats.segments
            );
        }
        Ok(RunSummary { steps: self.ticks })
    }
}

/// Run a preview job: build the source, render it, export the network.
pub fn run_preview(job: &JobConfig, out_dir: &Path) -> Result<()> {
    let source = FrankReadConfig {
        arm_length: job.source.arm_length,
        box_length: job.source.box_length,
        burgers: Vector3::from(job.source.burgers),
        plane_normal: Vector3::from(job.source.plane_normal),
        periodic: job.source.periodic,
    };
    let (mut network, frame) =
        frank_read_source(&source).context("building Frank-Read source")?;
    println!(
        "Frank-Read source: {} nodes, {} segments, box edge {} b",
        network.len(),
        network.link_count(),
        job.source.box_length
    );

    let mut state = build_state(job, &frame);

    let renderer = NetworkRenderer::with_backend(create_backend(&job.render.backend));
    let options = RenderOptions {
        draw_links: job.render.draw_links,
        trim: job.render.trim,
        blocking: job.render.blocking,
        pause: Duration::from_millis(job.render.pause_ms),
    };
    let mut driver = PreviewDriver {
        renderer,
        options,
        ticks: job.render.ticks,
    };

    let summary = driver.run(&mut network, &mut state)?;
    println!("Preview finished after {} frames.", summary.steps);

    if job.output.save_network {
        let path = out_dir.join("frank_read_src.json");
        write_network_json(&network, &path)?;
    }
    Ok(())
}

/// Assemble the shared simulation state from the job configuration.
fn build_state(job: &JobConfig, frame: &GlideFrame) -> SimulationState {
    SimulationState {
        crystal: job.state.crystal,
        orientation: *frame.rotation(),
        burgers_magnitude: job.state.burgers_magnitude,
        shear_modulus: job.state.shear_modulus,
        poisson_ratio: job.state.poisson_ratio,
        core_radius: job.state.core_radius,
        max_segment: job.state.max_segment_fraction * job.source.box_length,
        min_segment: job.state.min_segment_fraction * job.source.box_length,
        annihilation_radius: job.state.annihilation_radius,
        mobility: MobilityCoefficients {
            reference: job.state.mobility_reference,
            edge: job.state.mobility_edge,
            screw: job.state.mobility_screw,
        },
        applied_stress: job.state.applied_stress,
        last_bounds: None,
    }
}

/// Write the network document to a JSON file.
pub fn write_network_json(network: &DisNetwork, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&network.to_document())
        .context("serialising network document")?;
    std::fs::write(path, json)?;
    println!("Network written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JobConfig;

    fn headless_job() -> JobConfig {
        toml::from_str(
            r#"
            [source]
            box_length = 1000.0
            arm_length = 125.0
            burgers = [0.57735, 0.57735, 0.57735]
            plane_normal = [1.0, -1.0, 0.0]

            [render]
            backend = "headless"
            pause_ms = 0
            ticks = 3
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_preview_driver_reports_tick_count() {
        let job = headless_job();
        let source = FrankReadConfig {
            arm_length: job.source.arm_length,
            box_length: job.source.box_length,
            burgers: Vector3::from(job.source.burgers),
            plane_normal: Vector3::from(job.source.plane_normal),
            periodic: true,
        };
        let (mut network, frame) = frank_read_source(&source).unwrap();
        let mut state = build_state(&job, &frame);

        let mut driver = PreviewDriver {
            renderer: NetworkRenderer::with_backend(create_backend("headless")),
            options: RenderOptions {
                pause: Duration::ZERO,
                ..Default::default()
            },
            ticks: 3,
        };
        let summary = driver.run(&mut network, &mut state).unwrap();
        assert_eq!(summary.steps, 3);
        // the renderer left its bounds bookkeeping behind
        assert!(state.last_bounds.is_some());
    }

    #[test]
    fn test_state_segment_bounds_scale_with_box() {
        let job = headless_job();
        let frame = GlideFrame::from_burgers_and_normal(
            &Vector3::from(job.source.burgers),
            &Vector3::from(job.source.plane_normal),
        )
        .unwrap();
        let state = build_state(&job, &frame);
        assert_eq!(state.max_segment, 40.0);
        assert_eq!(state.min_segment, 10.0);
    }
}
