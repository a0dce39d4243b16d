//! Proximity colorizer: spatially adjacent cliques get adjacent hues.
//!
//! Cliques are sorted by the angle of their member-position centroid around
//! the canvas center and walked around a hue wheel in that order, so the
//! color gradient follows the layout instead of the (arbitrary) clique ids.

use std::collections::BTreeMap;

use crate::config::ColorConfig;
use crate::graph::Clique;
use crate::layout::Layout;

/// Color table keyed by clique id.
pub type CliqueColors = BTreeMap<usize, String>;

pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> String {
    format!("hsl({hue:.2}, {saturation:.0}%, {lightness:.0}%)")
}

/// Cyclic pick from the fixed palette, used when no centroid data exists
/// (clique display off, or a clique with no positioned members).
pub fn fallback_color(clique_id: usize, config: &ColorConfig) -> String {
    let palette = &config.fallback_palette;
    if palette.is_empty() {
        return hsl(0.0, config.saturation_base, config.lightness_base);
    }
    palette[clique_id % palette.len()].clone()
}

/// Assign every clique a color.
///
/// Cliques whose members have planned positions get hue-wheel colors in
/// centroid-angle order: hue = sorted-index / count * 360, with small
/// parity/modulo offsets on saturation and lightness so near-identical
/// neighboring hues still read as distinct. Everything else falls back to
/// the cyclic palette.
pub fn assign_clique_colors(
    cliques: &[Clique],
    layout: Option<&Layout>,
    center: (f64, f64),
    config: &ColorConfig,
) -> CliqueColors {
    let mut colors: CliqueColors = CliqueColors::new();
    if cliques.is_empty() {
        return colors;
    }

    let mut angled: Vec<(usize, f64)> = Vec::new();
    for clique in cliques {
        match layout.and_then(|layout| centroid(clique, layout)) {
            Some((x, y)) => {
                let angle = (y - center.1).atan2(x - center.0);
                angled.push((clique.id, angle));
            }
            None => {
                colors.insert(clique.id, fallback_color(clique.id, config));
            }
        }
    }

    angled.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    let count = angled.len();
    for (index, (clique_id, _)) in angled.into_iter().enumerate() {
        let hue = index as f64 / count as f64 * 360.0;
        let saturation = config.saturation_base + config.saturation_step * (index % 2) as f64;
        let lightness = config.lightness_base - config.lightness_step * (index % 3) as f64;
        colors.insert(clique_id, hsl(hue, saturation, lightness));
    }
    colors
}

fn centroid(clique: &Clique, layout: &Layout) -> Option<(f64, f64)> {
    let mut sum = (0.0, 0.0);
    let mut count = 0usize;
    for member in &clique.members {
        if let Some(position) = layout.get(member) {
            sum.0 += position.x;
            sum.1 += position.y;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some((sum.0 / count as f64, sum.1 / count as f64))
}
