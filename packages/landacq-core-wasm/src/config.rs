use serde::{Deserialize, Serialize};

use crate::density::{self, MAX_DENSITY_STEPS};
use crate::error::{DashboardError, Result};
use crate::status_labels::StatusLabelTable;

pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/EijiGorilla/EijiGorilla.github.io/master/WebApp/ArcGIS_API_for_JavaScript/Sample/MMSP_Land_Sample.geojson";

// Fill used for parcels whose status is missing or not in the label table
pub const DEFAULT_FILL_COLOR: &str = "#fff5eb";

/// Dashboard configuration passed in from JS. Every field is optional there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub data_url: String,
    pub status_labels: StatusLabelTable,
    pub default_fill_color: String,
    pub density_bands: DensityBandConfig,
}

/// Legend density bands: `< lowest`, then `interval`-wide steps, then `>= highest`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityBandConfig {
    pub lowest: f64,
    pub highest: f64,
    pub interval: f64,
}

impl Default for DensityBandConfig {
    fn default() -> Self {
        DensityBandConfig {
            lowest: 200.0,
            highest: 1000.0,
            interval: 200.0,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_url: DEFAULT_DATA_URL.to_string(),
            status_labels: StatusLabelTable::default(),
            default_fill_color: DEFAULT_FILL_COLOR.to_string(),
            density_bands: DensityBandConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_url.trim().is_empty() {
            return Err(DashboardError::InvalidConfig("dataUrl is empty".to_string()));
        }
        if self.status_labels.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "statusLabels must contain at least one entry".to_string(),
            ));
        }
        let bands = &self.density_bands;
        if !(bands.interval.is_finite() && bands.interval > 0.0) {
            return Err(DashboardError::InvalidConfig(format!(
                "density band interval must be positive, got {}",
                bands.interval
            )));
        }
        if !(bands.lowest.is_finite() && bands.highest.is_finite()) || bands.highest < bands.lowest {
            return Err(DashboardError::InvalidConfig(format!(
                "density band range {}..{} is invalid",
                bands.lowest, bands.highest
            )));
        }
        if density::grid_steps(bands).is_none() {
            return Err(DashboardError::InvalidConfig(format!(
                "density band range {}..{} must be a whole number of {}-wide steps, at most {}",
                bands.lowest, bands.highest, bands.interval, MAX_DENSITY_STEPS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"dataUrl": "http://localhost/parcels.geojson"}"#).unwrap();
        assert_eq!(config.data_url, "http://localhost/parcels.geojson");
        assert_eq!(config.status_labels.len(), 7);
        assert_eq!(config.default_fill_color, DEFAULT_FILL_COLOR);
        assert_eq!(config.density_bands, DensityBandConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_label_table_is_ordered() {
        let config: DashboardConfig = serde_json::from_str(
            r##"{"statusLabels": [{"label": "Done", "color": "#000000"}, {"label": "Open", "color": "#ffffff"}]}"##,
        )
        .unwrap();
        assert_eq!(config.status_labels.code_for_category("Open"), Some(2));
    }

    #[test]
    fn rejects_empty_labels_and_bad_interval() {
        let mut config = DashboardConfig::default();
        config.status_labels = StatusLabelTable::new(Vec::new());
        assert!(matches!(config.validate(), Err(DashboardError::InvalidConfig(_))));

        let mut config = DashboardConfig::default();
        config.density_bands.interval = 0.0;
        assert!(matches!(config.validate(), Err(DashboardError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_off_grid_density_range() {
        let mut config = DashboardConfig::default();
        config.density_bands = DensityBandConfig { lowest: 200.0, highest: 900.0, interval: 200.0 };
        assert!(matches!(config.validate(), Err(DashboardError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_too_many_density_bands() {
        let mut config = DashboardConfig::default();
        config.density_bands = DensityBandConfig { lowest: 0.0, highest: 1e12, interval: 1e-6 };
        assert!(matches!(config.validate(), Err(DashboardError::InvalidConfig(_))));

        config.density_bands = DensityBandConfig { lowest: 0.0, highest: 6400.0, interval: 100.0 };
        assert!(config.validate().is_ok());
    }
}
