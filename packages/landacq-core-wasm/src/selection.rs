use serde::{Deserialize, Serialize};

use crate::density::DensityBand;
use crate::geojson_features::ALL_STATIONS;

/// Station dropdown state. `Unset` (nothing picked yet) filters like `All`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum StationFilter {
    #[default]
    Unset,
    All,
    Named(String),
}

impl StationFilter {
    pub fn from_dropdown(value: &str) -> Self {
        if value == ALL_STATIONS {
            StationFilter::All
        } else {
            StationFilter::Named(value.to_string())
        }
    }

    pub fn matches(&self, station_name: &str) -> bool {
        match self {
            StationFilter::Unset | StationFilter::All => true,
            StationFilter::Named(name) => name == station_name,
        }
    }
}

/// User selection driving the projection. Mutated only through the transitions below.
///
/// The status slice and the density band are exclusive map overlays: setting
/// one clears the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub station: StationFilter,
    pub status_filter: Option<u32>,
    pub density_band: Option<DensityBand>,
    pub highlight_cleared: bool,
}

impl Selection {
    /// Dropdown change. Slice and band overlays belong to the previous
    /// station's subset, so both are dropped.
    pub fn select_station(&mut self, value: &str) {
        self.station = StationFilter::from_dropdown(value);
        self.status_filter = None;
        self.density_band = None;
        self.highlight_cleared = false;
    }

    /// Chart slice or legend status click. Re-selecting the active code re-applies it.
    pub fn select_status(&mut self, code: u32) {
        self.status_filter = Some(code);
        self.density_band = None;
        self.highlight_cleared = false;
    }

    pub fn select_density_band(&mut self, band: DensityBand) {
        self.density_band = Some(band);
        self.status_filter = None;
        self.highlight_cleared = false;
    }

    /// Drop the highlight overlay only.
    pub fn reset(&mut self) {
        self.highlight_cleared = true;
    }
}
