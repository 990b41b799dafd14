// Shared data structures exchanged between the core and the page
use geo::BoundingRect;
use geo_types::{MultiPolygon, Rect};
use serde::{Deserialize, Serialize};

use crate::density::DensityBand;
use crate::selection::Selection;

/// One land parcel. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelFeature {
    pub id: Option<String>,
    pub station_name: String,
    pub status_code: Option<u32>,
    pub owner: String,
    pub cn: String,
    pub density: Option<f64>,
    pub geometry: MultiPolygon<f64>,
}

impl ParcelFeature {
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.geometry.bounding_rect()
    }
}

/// Map extent to fit, in lng/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingRegion {
    pub fn union(&self, other: &BoundingRegion) -> BoundingRegion {
        BoundingRegion {
            min_lng: self.min_lng.min(other.min_lng),
            min_lat: self.min_lat.min(other.min_lat),
            max_lng: self.max_lng.max(other.max_lng),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

impl From<Rect<f64>> for BoundingRegion {
    fn from(rect: Rect<f64>) -> Self {
        BoundingRegion {
            min_lng: rect.min().x,
            min_lat: rect.min().y,
            max_lng: rect.max().x,
            max_lat: rect.max().y,
        }
    }
}

/// One pie slice / legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlice {
    pub category: String,
    pub value: usize,
    pub color: String,
    pub status_code: u32,
    pub percent: f64,
    // Legend value column, e.g. "43% (12)"
    pub legend_text: String,
}

/// One row of the density legend. `value` is what a click on the row reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityLegendEntry {
    pub label: String,
    pub value: f64,
    pub band: DensityBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LoadStatus {
    Pending,
    #[serde(rename_all = "camelCase")]
    Ready { feature_count: usize },
    Unavailable { reason: String },
}

/// Redraw-ready snapshot. Always rebuilt, never patched.
///
/// Feature lists are indices into the loaded collection, in collection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub visible_features: Vec<usize>,
    pub highlighted_features: Vec<usize>,
    pub bounding_region: Option<BoundingRegion>,
    pub chart_data: Vec<ChartSlice>,
    pub total_count: usize,
    pub selection: Selection,
    pub data_status: LoadStatus,
}

impl ViewState {
    /// Snapshot shown before data arrives, or when it never will.
    pub fn empty(selection: Selection, data_status: LoadStatus) -> Self {
        ViewState {
            visible_features: Vec::new(),
            highlighted_features: Vec::new(),
            bounding_region: None,
            chart_data: Vec::new(),
            total_count: 0,
            selection,
            data_status,
        }
    }
}

/// Popup fields for a clicked parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelPopup {
    pub station: String,
    pub status: String,
    pub lot_id: String,
    pub owner: String,
    // Permanent tooltip text drawn on the parcel (the CN property)
    pub label: String,
}
