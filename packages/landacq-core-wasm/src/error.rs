use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced by the loading and configuration paths.
///
/// Aggregation and projection are total and never produce one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Failed to fetch parcel data: {0}")]
    Fetch(String),

    #[error("Failed to parse parcel data: {0}")]
    Parse(String),

    #[error("Invalid dashboard configuration: {0}")]
    InvalidConfig(String),

    #[error("Parcel data has not been loaded")]
    NotLoaded,
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Parse(err.to_string())
    }
}

impl From<DashboardError> for JsValue {
    fn from(err: DashboardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
