use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

const FALLBACK_PALETTE: [&str; 12] = [
    "hsl(0, 70%, 62%)",
    "hsl(30, 70%, 62%)",
    "hsl(60, 70%, 62%)",
    "hsl(90, 70%, 62%)",
    "hsl(120, 70%, 62%)",
    "hsl(150, 70%, 62%)",
    "hsl(180, 70%, 62%)",
    "hsl(210, 70%, 62%)",
    "hsl(240, 70%, 62%)",
    "hsl(270, 70%, 62%)",
    "hsl(300, 70%, 62%)",
    "hsl(330, 70%, 62%)",
];

static DEFAULT_PALETTE: Lazy<Vec<String>> = Lazy::new(|| {
    FALLBACK_PALETTE
        .iter()
        .map(|value| value.to_string())
        .collect()
});

/// Canvas geometry and placement tuning for the layout planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Scatter mode: ring radius as a fraction of min(width, height).
    pub scatter_radius_factor: f64,
    /// Scatter mode: bound of the per-node radial perturbation.
    pub scatter_jitter: f64,
    /// Cluster mode: group ring radius as a fraction of min(width, height).
    pub cluster_radius_factor: f64,
    /// Cluster mode: floor of the sub-circle radius within a group.
    pub cluster_min_radius: f64,
    /// Cluster mode: sub-circle radius grows by sqrt(group size) times this.
    pub cluster_member_spread: f64,
    /// Cluster mode: bound of the within-group jitter.
    pub cluster_jitter: f64,
    /// Unclustered ring radius as a multiple of the group ring radius.
    pub unclustered_ring_factor: f64,
    /// Bound of the jitter on the unclustered ring.
    pub unclustered_jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            scatter_radius_factor: 0.3,
            scatter_jitter: 50.0,
            cluster_radius_factor: 0.25,
            cluster_min_radius: 30.0,
            cluster_member_spread: 15.0,
            cluster_jitter: 20.0,
            unclustered_ring_factor: 1.8,
            unclustered_jitter: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Per-edge distance/strength suggestions handed to the force simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeHintConfig {
    pub default_distance: f64,
    pub default_strength: f64,
    /// Distance when both endpoints share a dominant clique and clique
    /// display is on.
    pub clique_distance: f64,
    pub clique_strength: f64,
}

impl Default for EdgeHintConfig {
    fn default() -> Self {
        Self {
            default_distance: 120.0,
            default_strength: 0.3,
            clique_distance: 60.0,
            clique_strength: 0.7,
        }
    }
}

/// Hue-wheel tuning for the proximity colorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub saturation_base: f64,
    /// Added on odd sorted indexes to break banding between near hues.
    pub saturation_step: f64,
    pub lightness_base: f64,
    /// Subtracted by (index mod 3) steps, same purpose.
    pub lightness_step: f64,
    /// Cyclic palette used when no centroid data exists.
    pub fallback_palette: Vec<String>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            saturation_base: 65.0,
            saturation_step: 10.0,
            lightness_base: 62.0,
            lightness_step: 6.0,
            fallback_palette: DEFAULT_PALETTE.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub hints: EdgeHintConfig,
    pub color: ColorConfig,
}

/// Load a config file, strict JSON first with a JSON5 fallback for
/// hand-written files. `None` means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = match serde_json::from_str::<Config>(&contents) {
        Ok(config) => config,
        Err(_) => json5::from_str::<Config>(&contents)?,
    };
    Ok(config)
}
