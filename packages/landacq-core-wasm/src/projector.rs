use crate::aggregator::aggregate;
use crate::geojson_features::FeatureStore;
use crate::models::{BoundingRegion, LoadStatus, ViewState};
use crate::selection::Selection;
use crate::status_labels::StatusLabelTable;

/// Indices of features passing the station filter.
pub fn station_subset(store: &FeatureStore, selection: &Selection) -> Vec<usize> {
    store
        .iter()
        .filter(|(_, f)| selection.station.matches(&f.station_name))
        .map(|(idx, _)| idx)
        .collect()
}

/// Indices the map highlights and fits to.
///
/// A density band looks at the whole store. A status slice narrows the
/// station subset. With neither, the station subset itself is highlighted.
pub fn highlight_subset(store: &FeatureStore, selection: &Selection, station_subset: &[usize]) -> Vec<usize> {
    if let Some(band) = selection.density_band {
        return store
            .iter()
            .filter(|(_, f)| f.density.map_or(false, |d| band.contains(d)))
            .map(|(idx, _)| idx)
            .collect();
    }
    match selection.status_filter {
        Some(code) => station_subset
            .iter()
            .copied()
            .filter(|&idx| store.get(idx).and_then(|f| f.status_code) == Some(code))
            .collect(),
        None => station_subset.to_vec(),
    }
}

/// Smallest region covering every geometry in `indices`. `None` when nothing has extent.
pub fn bounding_region(store: &FeatureStore, indices: &[usize]) -> Option<BoundingRegion> {
    indices
        .iter()
        .filter_map(|&idx| store.get(idx))
        .filter_map(|f| f.bounds())
        .map(BoundingRegion::from)
        .reduce(|acc, r| acc.union(&r))
}

/// Rebuild the full view snapshot from the store and the current selection.
pub fn project(store: &FeatureStore, labels: &StatusLabelTable, selection: &Selection) -> ViewState {
    let visible = station_subset(store, selection);
    let highlight = highlight_subset(store, selection, &visible);

    let chart_data = aggregate(visible.iter().filter_map(|&idx| store.get(idx)), labels).to_chart_slices(labels);
    let bounding_region = bounding_region(store, &highlight);
    let total_count = highlight.len();

    let highlighted_features = if selection.highlight_cleared {
        Vec::new()
    } else {
        highlight
    };

    ViewState {
        visible_features: visible,
        highlighted_features,
        bounding_region,
        chart_data,
        total_count,
        selection: selection.clone(),
        data_status: LoadStatus::Ready {
            feature_count: store.len(),
        },
    }
}
