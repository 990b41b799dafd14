// Leaflet path styles and popup content for parcels
use serde::{Deserialize, Serialize};

use crate::models::{ParcelFeature, ParcelPopup};
use crate::status_labels::StatusLabelTable;

pub const HIGHLIGHT_COLOR: &str = "#00FFFF";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: f64,
    pub opacity: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    pub stroke: bool,
}

/// Base fill by acquisition status; uncategorized parcels get `fallback_fill`.
pub fn default_style(feature: &ParcelFeature, labels: &StatusLabelTable, fallback_fill: &str) -> PathStyle {
    PathStyle {
        fill_color: labels.color_for(feature.status_code, fallback_fill).to_string(),
        fill_opacity: 0.7,
        weight: 1.0,
        opacity: 0.7,
        color: "black".to_string(),
        dash_array: Some("3".to_string()),
        stroke: true,
    }
}

pub fn highlight_style() -> PathStyle {
    PathStyle {
        fill_color: HIGHLIGHT_COLOR.to_string(),
        fill_opacity: 0.9,
        weight: 4.0,
        opacity: 1.0,
        color: HIGHLIGHT_COLOR.to_string(),
        dash_array: None,
        stroke: true,
    }
}

pub fn popup_for(feature: &ParcelFeature, labels: &StatusLabelTable) -> ParcelPopup {
    let status = feature
        .status_code
        .and_then(|code| labels.get(code))
        .map(|l| l.label.clone())
        .unwrap_or_else(|| "Undefined".to_string());

    ParcelPopup {
        station: feature.station_name.clone(),
        status,
        lot_id: feature.id.clone().unwrap_or_default(),
        owner: feature.owner.clone(),
        label: feature.cn.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FILL_COLOR;
    use geo_types::MultiPolygon;

    fn parcel(status: Option<u32>) -> ParcelFeature {
        ParcelFeature {
            id: Some("L-12".to_string()),
            station_name: "Quirino".to_string(),
            status_code: status,
            owner: "J. Cruz".to_string(),
            cn: "12".to_string(),
            density: None,
            geometry: MultiPolygon::new(Vec::new()),
        }
    }

    #[test]
    fn fill_follows_status_with_fallback() {
        let labels = StatusLabelTable::default();
        assert_eq!(default_style(&parcel(Some(1)), &labels, DEFAULT_FILL_COLOR).fill_color, "#00734d");
        assert_eq!(default_style(&parcel(None), &labels, DEFAULT_FILL_COLOR).fill_color, "#fff5eb");
        assert_eq!(default_style(&parcel(Some(9)), &labels, DEFAULT_FILL_COLOR).fill_color, "#fff5eb");
    }

    #[test]
    fn highlight_is_cyan() {
        let style = highlight_style();
        assert_eq!(style.fill_color, HIGHLIGHT_COLOR);
        assert_eq!(style.weight, 4.0);
    }

    #[test]
    fn popup_labels_missing_status_as_undefined() {
        let labels = StatusLabelTable::default();
        let popup = popup_for(&parcel(Some(2)), &labels);
        assert_eq!(popup.status, "For Payment Processing");
        assert_eq!(popup.lot_id, "L-12");
        assert_eq!(popup.owner, "J. Cruz");
        assert_eq!(popup.label, "12");
        assert_eq!(popup_for(&parcel(None), &labels).status, "Undefined");
        assert_eq!(popup_for(&parcel(Some(12)), &labels).status, "Undefined");
    }
}
