use serde::{Deserialize, Serialize};

use crate::config::DensityBandConfig;

// Tolerance when matching a clicked legend value against the band grid
const GRID_EPSILON: f64 = 1e-9;

// Upper bound on interval-wide bands between `lowest` and `highest`
pub const MAX_DENSITY_STEPS: usize = 64;

/// A density legend band. Bands partition the density axis without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DensityBand {
    Below { upper: f64 },
    Range { lower: f64, upper: f64 },
    AtLeast { lower: f64 },
}

impl DensityBand {
    pub fn contains(&self, density: f64) -> bool {
        match *self {
            DensityBand::Below { upper } => density < upper,
            DensityBand::Range { lower, upper } => density >= lower && density < upper,
            DensityBand::AtLeast { lower } => density >= lower,
        }
    }

    /// Value shown on the legend entry, which is also what a click reports back.
    pub fn legend_value(&self) -> f64 {
        match *self {
            DensityBand::Below { upper } => upper,
            DensityBand::Range { upper, .. } => upper,
            DensityBand::AtLeast { lower } => lower,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            DensityBand::Below { upper } => format!("< {}", upper),
            DensityBand::Range { lower, upper } => format!("{} - {}", lower, upper),
            DensityBand::AtLeast { lower } => format!(">= {}", lower),
        }
    }
}

/// Number of `interval`-wide steps from `lowest` to `highest`.
///
/// `None` when the range is not a whole number of steps or needs more than
/// `MAX_DENSITY_STEPS` of them.
pub fn grid_steps(config: &DensityBandConfig) -> Option<usize> {
    if !(config.interval.is_finite() && config.interval > 0.0) || config.highest < config.lowest {
        return None;
    }
    let steps = (config.highest - config.lowest) / config.interval;
    if !steps.is_finite() || steps > MAX_DENSITY_STEPS as f64 {
        return None;
    }
    if (steps - steps.round()).abs() > GRID_EPSILON * steps.max(1.0) {
        return None;
    }
    Some(steps.round() as usize)
}

/// All bands for the legend, lowest first.
///
/// An off-grid range ends with a narrower `[last, highest)` band so the axis
/// stays covered.
pub fn bands(config: &DensityBandConfig) -> Vec<DensityBand> {
    let mut out = vec![DensityBand::Below { upper: config.lowest }];
    if config.interval.is_finite() && config.interval > 0.0 && config.highest > config.lowest {
        let span = (config.highest - config.lowest) / config.interval;
        let steps = (span - GRID_EPSILON).ceil().clamp(0.0, MAX_DENSITY_STEPS as f64) as usize;
        for i in 0..steps {
            let lower = config.lowest + i as f64 * config.interval;
            let upper = if i + 1 == steps {
                config.highest
            } else {
                config.lowest + (i + 1) as f64 * config.interval
            };
            out.push(DensityBand::Range { lower, upper });
        }
    }
    out.push(DensityBand::AtLeast { lower: config.highest });
    out
}

/// Map a clicked legend value to its band.
///
/// `lowest` selects everything below it, `highest` everything at or above it,
/// and any grid value in between selects the interval ending at that value.
pub fn band_for_legend_value(value: f64, config: &DensityBandConfig) -> Option<DensityBand> {
    if !value.is_finite() || config.interval <= 0.0 {
        return None;
    }
    if (value - config.lowest).abs() < GRID_EPSILON {
        return Some(DensityBand::Below { upper: config.lowest });
    }
    if (value - config.highest).abs() < GRID_EPSILON {
        return Some(DensityBand::AtLeast { lower: config.highest });
    }
    if value < config.lowest || value > config.highest {
        return None;
    }
    let steps = (value - config.lowest) / config.interval;
    if (steps - steps.round()).abs() > GRID_EPSILON {
        return None;
    }
    Some(DensityBand::Range {
        lower: value - config.interval,
        upper: value,
    })
}

/// Parse legend entry text such as `"400"` into a band.
pub fn band_for_legend_text(text: &str, config: &DensityBandConfig) -> Option<DensityBand> {
    let value = text.trim().parse::<f64>().ok()?;
    band_for_legend_value(value, config)
}
