use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DashboardError, Result};
use crate::models::ParcelFeature;

pub const ALL_STATIONS: &str = "All";

// Raw GeoJSON shapes as fetched; properties stay untyped until normalized
#[derive(Deserialize)]
struct RawFeatureCollection {
    r#type: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    r#type: String,
    coordinates: Value, // Using Value for flexibility with different geometry types
}

/// The parcel collection, loaded once and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureStore {
    features: Vec<ParcelFeature>,
}

impl FeatureStore {
    pub fn new(features: Vec<ParcelFeature>) -> Self {
        FeatureStore { features }
    }

    pub fn from_geojson_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawFeatureCollection = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let raw: RawFeatureCollection = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawFeatureCollection) -> Result<Self> {
        if raw.r#type != "FeatureCollection" {
            return Err(DashboardError::Parse(format!(
                "expected a FeatureCollection, got '{}'",
                raw.r#type
            )));
        }
        let features = raw.features.into_iter().map(normalize_feature).collect();
        Ok(FeatureStore { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&ParcelFeature> {
        self.features.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ParcelFeature)> {
        self.features.iter().enumerate()
    }

    /// Dropdown options: distinct station names in first-seen order, then "All".
    pub fn station_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        for feature in &self.features {
            let name = feature.station_name.as_str();
            if name.is_empty() || name == ALL_STATIONS {
                continue;
            }
            if !options.iter().any(|o| o == name) {
                options.push(name.to_string());
            }
        }
        options.push(ALL_STATIONS.to_string());
        options
    }
}

fn normalize_feature(raw: RawFeature) -> ParcelFeature {
    let props = raw.properties.unwrap_or_default();

    ParcelFeature {
        id: props.get("Id").and_then(value_as_text),
        station_name: props.get("Station1").and_then(value_as_text).unwrap_or_default(),
        status_code: props.get("StatusNVS3").and_then(value_as_status),
        owner: props.get("OWNER").and_then(value_as_text).unwrap_or_default(),
        cn: props.get("CN").and_then(value_as_text).unwrap_or_default(),
        density: props.get("density").and_then(value_as_number),
        geometry: raw.geometry.map(to_multi_polygon).unwrap_or_else(|| MultiPolygon::new(Vec::new())),
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

// Status codes are 1-based; zero, negatives and fractions count as uncategorized
fn value_as_status(value: &Value) -> Option<u32> {
    let n = value_as_number(value)?;
    if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}

fn to_multi_polygon(geometry: RawGeometry) -> MultiPolygon<f64> {
    match geometry.r#type.as_str() {
        "Polygon" => serde_json::from_value::<Vec<Vec<Vec<f64>>>>(geometry.coordinates)
            .ok()
            .and_then(rings_to_polygon)
            .map(|p| MultiPolygon::new(vec![p]))
            .unwrap_or_else(|| MultiPolygon::new(Vec::new())),
        "MultiPolygon" => serde_json::from_value::<Vec<Vec<Vec<Vec<f64>>>>>(geometry.coordinates)
            .map(|polys| MultiPolygon::new(polys.into_iter().filter_map(rings_to_polygon).collect()))
            .unwrap_or_else(|_| MultiPolygon::new(Vec::new())),
        // Parcels are polygonal; anything else renders nothing and has no extent
        _ => MultiPolygon::new(Vec::new()),
    }
}

fn rings_to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Option<Polygon<f64>> {
    let mut rings = rings.into_iter().map(ring_to_line_string);
    let exterior = rings.next()?;
    if exterior.0.is_empty() {
        return None;
    }
    Some(Polygon::new(exterior, rings.collect()))
}

fn ring_to_line_string(ring: Vec<Vec<f64>>) -> LineString<f64> {
    ring.into_iter()
        .filter(|point| point.len() >= 2)
        .map(|point| Coord { x: point[0], y: point[1] })
        .collect()
}
