//! TOML configuration deserialisation for preview jobs.

use serde::Deserialize;

use slipnet_core::state::CrystalStructure;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Frank-Read source parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Edge length of the cubic simulation cell (b).
    pub box_length: f64,
    /// Length of the pinned source arm (b).
    pub arm_length: f64,
    /// Burgers vector in laboratory coordinates, used as given.
    pub burgers: [f64; 3],
    /// Glide-plane normal in laboratory coordinates.
    pub plane_normal: [f64; 3],
    /// Periodic boundaries on all three axes (default: true).
    #[serde(default = "default_true")]
    pub periodic: bool,
}

/// Material and engine constants; defaults are the BCC reference values.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub crystal: CrystalStructure,
    /// Physical Burgers vector magnitude (m).
    pub burgers_magnitude: f64,
    /// Shear modulus (Pa).
    pub shear_modulus: f64,
    pub poisson_ratio: f64,
    pub core_radius: f64,
    /// Remesh upper bound as a fraction of the box length.
    pub max_segment_fraction: f64,
    /// Remesh lower bound as a fraction of the box length.
    pub min_segment_fraction: f64,
    pub annihilation_radius: f64,
    pub mobility_reference: f64,
    pub mobility_edge: f64,
    pub mobility_screw: f64,
    /// Applied stress in Voigt order (xx, yy, zz, yz, xz, xy), Pa.
    pub applied_stress: [f64; 6],
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            crystal: CrystalStructure::Bcc,
            burgers_magnitude: 3e-10,
            shear_modulus: 50e9,
            poisson_ratio: 0.3,
            core_radius: 1.0,
            max_segment_fraction: 0.04,
            min_segment_fraction: 0.01,
            annihilation_radius: 3.0,
            mobility_reference: 1.0,
            mobility_edge: 1.0,
            mobility_screw: 0.1,
            applied_stress: [0.0, 0.0, 0.0, 0.0, -4.0e8, 0.0],
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Backend preference: "auto", "console", or "headless".
    pub backend: String,
    pub draw_links: bool,
    pub trim: bool,
    pub blocking: bool,
    /// Animation pause between frames (ms).
    pub pause_ms: u64,
    /// Number of frames to present.
    pub ticks: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: "auto".into(),
            draw_links: true,
            trim: false,
            blocking: false,
            pause_ms: 10,
            ticks: 1,
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    pub directory: String,
    /// Whether to save the network document as JSON (default: true).
    pub save_network: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./output".into(),
            save_network: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
