use js_sys::{Function, Uint8Array};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// Create a console module for logging
pub mod console;
pub mod error;
pub mod config;
pub mod status_labels;
pub mod models;
// GeoJSON parsing and the feature store
pub mod geojson_features;
pub mod density;
pub mod aggregator;
pub mod selection;
pub mod projector;
pub mod style;
// Chart mounts and their datasets
pub mod chart_registry;
// Global dashboard state
pub mod module_state;

use config::DashboardConfig;
use error::DashboardError;
use geojson_features::FeatureStore;
use models::ViewState;
use module_state::ModuleState;

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

#[wasm_bindgen]
extern "C" {
    // JavaScript function to fetch data from URL
    #[wasm_bindgen(js_namespace = wasmJsHelpers, catch)]
    pub fn fetch(url: &str) -> Result<js_sys::Promise, JsValue>;
}

// Use the macro from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => (crate::console::log(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

thread_local! {
    // JS callbacks are not Send, so they live beside the module state rather than in it
    static SUBSCRIBERS: RefCell<Vec<(u32, Function)>> = RefCell::new(Vec::new());
    static NEXT_SUBSCRIBER_ID: RefCell<u32> = RefCell::new(1);
}

// This sets up the wasm_bindgen start functionality
#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        // Set the panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("Land acquisition dashboard core initialized");
    });
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(to_value(value)?)
}

// Push a fresh snapshot to the mounted charts and every subscriber
fn publish(view: &ViewState) -> Result<JsValue, JsValue> {
    chart_registry::with_registry(|registry| registry.replace_all(&view.chart_data))?;

    let js_view = to_js(view)?;
    let subscribers: Vec<Function> =
        SUBSCRIBERS.with(|subs| subs.borrow().iter().map(|(_, f)| f.clone()).collect());
    for callback in subscribers {
        if let Err(err) = callback.call1(&JsValue::NULL, &js_view) {
            console_log!("View subscriber failed: {:?}", err);
        }
    }
    Ok(js_view)
}

/// Apply dashboard configuration (labels, colors, data URL, density bands).
#[wasm_bindgen]
pub fn configure_dashboard(config_js: JsValue) -> Result<JsValue, JsValue> {
    let config: DashboardConfig = if config_js.is_undefined() || config_js.is_null() {
        DashboardConfig::default()
    } else {
        from_value(config_js).map_err(|e| DashboardError::InvalidConfig(e.to_string()))?
    };
    let view = ModuleState::with_mut(|state| state.configure(config))?;
    publish(&view)
}

/// Fetch the parcel GeoJSON once and project the initial view.
///
/// On failure the dashboard switches to the "unavailable" state, subscribers are
/// told, and the error is returned. There is no retry.
#[wasm_bindgen]
pub async fn load_parcels(url: Option<String>) -> Result<JsValue, JsValue> {
    let url = url.unwrap_or_else(|| ModuleState::with(|state| state.config.data_url.clone()));
    console_log!("Fetching parcel data from {}", url);

    match fetch_parcels(&url).await {
        Ok(store) => {
            let view = ModuleState::with_mut(|state| state.install_store(store));
            publish(&view)
        }
        Err(err) => {
            let view = ModuleState::with_mut(|state| state.mark_unavailable(&err));
            publish(&view)?;
            Err(err.into())
        }
    }
}

async fn fetch_parcels(url: &str) -> Result<FeatureStore, DashboardError> {
    let promise = fetch(url).map_err(|e| DashboardError::Fetch(format!("{:?}", e)))?;
    let body = JsFuture::from(promise)
        .await
        .map_err(|e| DashboardError::Fetch(format!("{:?}", e)))?;

    // The helper may resolve to text or to raw bytes
    match body.as_string() {
        Some(text) => FeatureStore::from_geojson_str(&text),
        None => FeatureStore::from_geojson_slice(&Uint8Array::new(&body).to_vec()),
    }
}

/// Load parcels from a GeoJSON string the page already has.
#[wasm_bindgen]
pub fn load_parcels_from_str(geojson: &str) -> Result<JsValue, JsValue> {
    match FeatureStore::from_geojson_str(geojson) {
        Ok(store) => {
            let view = ModuleState::with_mut(|state| state.install_store(store));
            publish(&view)
        }
        Err(err) => {
            let view = ModuleState::with_mut(|state| state.mark_unavailable(&err));
            publish(&view)?;
            Err(err.into())
        }
    }
}

#[wasm_bindgen]
pub fn get_view_state() -> Result<JsValue, JsValue> {
    ModuleState::with(|state| to_js(&state.view))
}

#[wasm_bindgen]
pub fn get_station_options() -> Result<JsValue, JsValue> {
    let options = ModuleState::with(|state| state.station_options())?;
    to_js(&options)
}

#[wasm_bindgen]
pub fn get_density_bands() -> Result<JsValue, JsValue> {
    let legend = ModuleState::with(|state| state.density_legend());
    to_js(&legend)
}

#[wasm_bindgen]
pub fn on_station_selected(name: &str) -> Result<JsValue, JsValue> {
    let view = ModuleState::with_mut(|state| state.select_station(name));
    publish(&view)
}

#[wasm_bindgen]
pub fn on_status_slice_clicked(code: u32) -> Result<JsValue, JsValue> {
    let view = ModuleState::with_mut(|state| state.select_status(code));
    publish(&view)
}

/// Slice or legend click that reports the category label instead of the code.
#[wasm_bindgen]
pub fn on_status_category_clicked(category: &str) -> Result<JsValue, JsValue> {
    let view = ModuleState::with_mut(|state| state.select_status_category(category));
    publish(&view)
}

#[wasm_bindgen]
pub fn on_legend_band_clicked(legend_text: &str) -> Result<JsValue, JsValue> {
    let view = ModuleState::with_mut(|state| state.select_density_legend(legend_text));
    publish(&view)
}

#[wasm_bindgen]
pub fn on_reset() -> Result<JsValue, JsValue> {
    let view = ModuleState::with_mut(|state| state.reset());
    publish(&view)
}

#[wasm_bindgen]
pub fn get_parcel_popup(index: usize) -> Result<JsValue, JsValue> {
    let popup = ModuleState::with(|state| state.popup(index))?;
    to_js(&popup)
}

#[wasm_bindgen]
pub fn get_parcel_style(index: usize) -> Result<JsValue, JsValue> {
    let style = ModuleState::with(|state| state.feature_style(index))?;
    to_js(&style)
}

/// Register a callback invoked with every new view state. Returns an id for unsubscribing.
#[wasm_bindgen]
pub fn subscribe_view_state(callback: Function) -> u32 {
    let id = NEXT_SUBSCRIBER_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    });
    SUBSCRIBERS.with(|subs| subs.borrow_mut().push((id, callback)));
    id
}

#[wasm_bindgen]
pub fn unsubscribe_view_state(id: u32) -> bool {
    SUBSCRIBERS.with(|subs| {
        let mut subs = subs.borrow_mut();
        let before = subs.len();
        subs.retain(|(sub_id, _)| *sub_id != id);
        subs.len() != before
    })
}

/// Mount (or remount) a chart under a DOM id and return its initial dataset.
#[wasm_bindgen]
pub fn mount_chart(dom_id: &str) -> Result<JsValue, JsValue> {
    let dataset = ModuleState::with(|state| state.view.chart_data.clone());
    let replaced = chart_registry::with_registry(|registry| registry.mount(dom_id, dataset.clone()))?;
    console_log!("Mounted chart '{}'{}", dom_id, if replaced { " (replaced previous)" } else { "" });
    to_js(&dataset)
}

#[wasm_bindgen]
pub fn get_chart_dataset(dom_id: &str) -> Result<JsValue, JsValue> {
    let dataset = chart_registry::with_registry(|registry| {
        registry.get(dom_id).map(|mount| mount.dataset.clone())
    })?;
    to_js(&dataset)
}

/// Release a chart mount. Returns false if it was already disposed.
#[wasm_bindgen]
pub fn dispose_chart(dom_id: &str) -> Result<bool, JsValue> {
    chart_registry::with_registry(|registry| registry.dispose(dom_id))
}
