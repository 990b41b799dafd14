use lazy_static::lazy_static;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;

use crate::config::DashboardConfig;
use crate::console_log;
use crate::density::{self, DensityBand};
use crate::error::{DashboardError, Result};
use crate::geojson_features::FeatureStore;
use crate::models::{DensityLegendEntry, LoadStatus, ParcelPopup, ViewState};
use crate::projector::project;
use crate::selection::Selection;
use crate::style::{self, PathStyle};

// Module state holding the loaded parcels and the user's selection
pub struct ModuleState {
    pub config: DashboardConfig,

    // Empty until a load succeeds; never mutated afterwards
    pub store: FeatureStore,
    pub load_status: LoadStatus,

    pub selection: Selection,

    // Last snapshot handed to the page
    pub view: ViewState,
}

// Create a global static instance of the module state
lazy_static! {
    static ref MODULE_STATE: ReentrantMutex<RefCell<ModuleState>> =
        ReentrantMutex::new(RefCell::new(ModuleState::new()));
}

impl ModuleState {
    pub fn new() -> Self {
        ModuleState {
            config: DashboardConfig::default(),
            store: FeatureStore::default(),
            load_status: LoadStatus::Pending,
            selection: Selection::default(),
            view: ViewState::empty(Selection::default(), LoadStatus::Pending),
        }
    }

    pub fn with_mut<F, R>(f: F) -> R
    where
        F: FnOnce(&mut ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let mut borrow = guard.borrow_mut();
        f(&mut borrow)
    }

    pub fn with<F, R>(f: F) -> R
    where
        F: FnOnce(&ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let borrow = guard.borrow();
        f(&borrow)
    }

    pub fn configure(&mut self, config: DashboardConfig) -> Result<ViewState> {
        config.validate()?;
        self.config = config;
        Ok(self.recompute())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.load_status, LoadStatus::Ready { .. })
    }

    /// Install a freshly loaded collection and project the initial view.
    pub fn install_store(&mut self, store: FeatureStore) -> ViewState {
        console_log!(
            "Loaded {} parcels across {} stations",
            store.len(),
            store.station_options().len() - 1
        );
        self.load_status = LoadStatus::Ready {
            feature_count: store.len(),
        };
        self.store = store;
        self.selection = Selection::default();
        self.recompute()
    }

    /// Record a failed load. Any earlier data is dropped so nothing stale is shown.
    pub fn mark_unavailable(&mut self, err: &DashboardError) -> ViewState {
        console_log!("Parcel data unavailable: {}", err);
        self.store = FeatureStore::default();
        self.load_status = LoadStatus::Unavailable {
            reason: err.to_string(),
        };
        self.recompute()
    }

    /// Rebuild the snapshot from scratch.
    pub fn recompute(&mut self) -> ViewState {
        self.view = if self.is_loaded() {
            project(&self.store, &self.config.status_labels, &self.selection)
        } else {
            ViewState::empty(self.selection.clone(), self.load_status.clone())
        };
        self.view.clone()
    }

    pub fn select_station(&mut self, name: &str) -> ViewState {
        console_log!("Station selected: {}", name);
        self.selection.select_station(name);
        self.recompute()
    }

    pub fn select_status(&mut self, code: u32) -> ViewState {
        console_log!("Status slice selected: {}", code);
        self.selection.select_status(code);
        self.recompute()
    }

    /// Slice or legend click reporting a category label. Unknown labels change nothing.
    pub fn select_status_category(&mut self, category: &str) -> ViewState {
        match self.config.status_labels.code_for_category(category) {
            Some(code) => self.select_status(code),
            None => {
                console_log!("Ignoring click on unknown category '{}'", category);
                self.view.clone()
            }
        }
    }

    pub fn select_density_band(&mut self, band: DensityBand) -> ViewState {
        console_log!("Density band selected: {}", band.label());
        self.selection.select_density_band(band);
        self.recompute()
    }

    /// Density legend click reporting the entry's text. Non-band text changes nothing.
    pub fn select_density_legend(&mut self, text: &str) -> ViewState {
        match density::band_for_legend_text(text, &self.config.density_bands) {
            Some(band) => self.select_density_band(band),
            None => {
                console_log!("Ignoring click on legend entry '{}'", text);
                self.view.clone()
            }
        }
    }

    pub fn reset(&mut self) -> ViewState {
        console_log!("Highlight reset");
        self.selection.reset();
        self.recompute()
    }

    pub fn station_options(&self) -> Result<Vec<String>> {
        if !self.is_loaded() {
            return Err(DashboardError::NotLoaded);
        }
        Ok(self.store.station_options())
    }

    /// Density legend rows, lowest band first.
    pub fn density_legend(&self) -> Vec<DensityLegendEntry> {
        density::bands(&self.config.density_bands)
            .into_iter()
            .map(|band| DensityLegendEntry {
                label: band.label(),
                value: band.legend_value(),
                band,
            })
            .collect()
    }

    pub fn popup(&self, idx: usize) -> Result<Option<ParcelPopup>> {
        if !self.is_loaded() {
            return Err(DashboardError::NotLoaded);
        }
        Ok(self
            .store
            .get(idx)
            .map(|f| style::popup_for(f, &self.config.status_labels)))
    }

    /// Path style for one parcel, highlighted or not according to the current view.
    pub fn feature_style(&self, idx: usize) -> Result<Option<PathStyle>> {
        if !self.is_loaded() {
            return Err(DashboardError::NotLoaded);
        }
        if self.view.highlighted_features.binary_search(&idx).is_ok() {
            return Ok(Some(style::highlight_style()));
        }
        Ok(self.store.get(idx).map(|f| {
            style::default_style(f, &self.config.status_labels, &self.config.default_fill_color)
        }))
    }
}

impl Default for ModuleState {
    fn default() -> Self {
        Self::new()
    }
}
