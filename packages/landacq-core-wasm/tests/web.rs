//! Exercises the exported JS surface. Run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use landacq_core_wasm::density::DensityBand;
use landacq_core_wasm::models::{ChartSlice, DensityLegendEntry, LoadStatus, ViewState};
use landacq_core_wasm::*;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

const PARCELS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"Station1": "A", "StatusNVS3": 1, "Id": 1, "OWNER": "Reyes", "CN": "L-1"}, "geometry": {"type": "Polygon", "coordinates": [[[121.00, 14.60], [121.01, 14.60], [121.01, 14.61], [121.00, 14.60]]]}},
        {"type": "Feature", "properties": {"Station1": "A", "StatusNVS3": 1, "Id": 2}, "geometry": {"type": "Polygon", "coordinates": [[[121.01, 14.60], [121.02, 14.60], [121.02, 14.61], [121.01, 14.60]]]}},
        {"type": "Feature", "properties": {"Station1": "A", "StatusNVS3": 2, "Id": 3, "density": 450}, "geometry": {"type": "Polygon", "coordinates": [[[121.02, 14.60], [121.03, 14.60], [121.03, 14.61], [121.02, 14.60]]]}},
        {"type": "Feature", "properties": {"Station1": "A", "StatusNVS3": 3, "Id": 4}, "geometry": {"type": "Polygon", "coordinates": [[[121.03, 14.60], [121.04, 14.60], [121.04, 14.61], [121.03, 14.60]]]}},
        {"type": "Feature", "properties": {"Station1": "A", "StatusNVS3": 1, "Id": 5}, "geometry": {"type": "Polygon", "coordinates": [[[121.04, 14.60], [121.05, 14.60], [121.05, 14.61], [121.04, 14.60]]]}},
        {"type": "Feature", "properties": {"Station1": "B", "StatusNVS3": 2, "Id": 6}, "geometry": {"type": "Polygon", "coordinates": [[[121.10, 14.70], [121.11, 14.70], [121.11, 14.71], [121.10, 14.70]]]}},
        {"type": "Feature", "properties": {"Station1": "B", "StatusNVS3": 2, "Id": 7}, "geometry": {"type": "Polygon", "coordinates": [[[121.11, 14.70], [121.12, 14.70], [121.12, 14.71], [121.11, 14.70]]]}}
    ]
}"#;

fn view(value: Result<JsValue, JsValue>) -> ViewState {
    from_value(value.expect("call failed")).expect("not a view state")
}

fn setup() {
    configure_dashboard(JsValue::UNDEFINED).expect("default config");
    load_parcels_from_str(PARCELS).expect("load");
}

#[wasm_bindgen_test]
fn initial_view_after_load() {
    setup();
    let state = view(get_view_state());
    assert_eq!(state.total_count, 7);
    assert_eq!(state.data_status, LoadStatus::Ready { feature_count: 7 });

    let options: Vec<String> = from_value(get_station_options().unwrap()).unwrap();
    assert_eq!(options, vec!["A", "B", "All"]);
}

#[wasm_bindgen_test]
fn station_and_slice_clicks() {
    setup();
    let a = view(on_station_selected("A"));
    assert_eq!(a.total_count, 5);
    assert_eq!(a.chart_data[..3].iter().map(|s| s.value).collect::<Vec<_>>(), vec![3, 1, 1]);

    let slice = view(on_status_slice_clicked(2));
    assert_eq!(slice.highlighted_features, vec![2]);
    assert_eq!(slice.chart_data, a.chart_data);

    let again = view(on_status_category_clicked("For Payment Processing"));
    assert_eq!(again.highlighted_features, slice.highlighted_features);

    let b = view(on_station_selected("B"));
    assert_eq!(b.total_count, 2);
    assert_eq!(b.selection.status_filter, None);
}

#[wasm_bindgen_test]
fn reset_and_density_legend() {
    setup();
    let band = view(on_legend_band_clicked("600"));
    assert_eq!(band.highlighted_features, vec![2]);

    let reset = view(on_reset());
    assert!(reset.highlighted_features.is_empty());
    assert_eq!(reset.total_count, band.total_count);
}

#[wasm_bindgen_test]
fn density_legend_is_plain_objects() {
    setup();
    let legend_js = get_density_bands().unwrap();
    let first = js_sys::Array::from(&legend_js).get(0);
    assert!(!first.is_instance_of::<js_sys::Map>());
    let label = js_sys::Reflect::get(&first, &JsValue::from_str("label")).unwrap();
    assert_eq!(label.as_string().as_deref(), Some("< 200"));

    let legend: Vec<DensityLegendEntry> = from_value(legend_js).unwrap();
    assert_eq!(legend.len(), 6);
    assert_eq!(legend[1].value, 400.0);
    assert_eq!(legend[1].band, DensityBand::Range { lower: 200.0, upper: 400.0 });
}

#[wasm_bindgen_test]
fn chart_mount_follows_view_changes() {
    setup();
    mount_chart("pie-two").unwrap();
    on_station_selected("B").unwrap();

    let dataset: Option<Vec<ChartSlice>> = from_value(get_chart_dataset("pie-two").unwrap()).unwrap();
    let dataset = dataset.expect("mounted");
    assert_eq!(dataset[1].value, 2);

    assert!(dispose_chart("pie-two").unwrap());
    assert!(!dispose_chart("pie-two").unwrap());
}

#[wasm_bindgen_test]
fn bad_payload_marks_data_unavailable() {
    setup();
    assert!(load_parcels_from_str("{\"type\": \"Topology\"}").is_err());
    let state = view(get_view_state());
    assert!(matches!(state.data_status, LoadStatus::Unavailable { .. }));
    assert_eq!(state.total_count, 0);
    assert!(get_station_options().is_err());
}

#[wasm_bindgen_test]
fn popup_and_style_lookups() {
    setup();
    on_status_slice_clicked(1).unwrap();
    let popup: Option<landacq_core_wasm::models::ParcelPopup> =
        from_value(get_parcel_popup(0).unwrap()).unwrap();
    let popup = popup.expect("parcel 0");
    assert_eq!(popup.owner, "Reyes");
    assert_eq!(popup.status, "Paid");
    assert_eq!(popup.label, "L-1");

    let style: Option<landacq_core_wasm::style::PathStyle> =
        from_value(get_parcel_style(0).unwrap()).unwrap();
    assert_eq!(style.map(|s| s.fill_color), Some("#00FFFF".to_string()));
}
