use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

use crate::console_log;
use crate::models::ChartSlice;

/// One pie chart mounted in the page, keyed by its DOM id.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMount {
    pub dom_id: String,
    pub dataset: Vec<ChartSlice>,
    // Bumped every time the dataset is replaced
    pub revision: u64,
}

impl ChartMount {
    fn new(dom_id: &str, dataset: Vec<ChartSlice>) -> Self {
        ChartMount {
            dom_id: dom_id.to_string(),
            dataset,
            revision: 0,
        }
    }

    fn replace_dataset(&mut self, dataset: Vec<ChartSlice>) {
        self.dataset = dataset;
        self.revision += 1;
    }
}

/// Long-lived chart resources. At most one mount per DOM id.
pub struct ChartRegistry {
    mounts: HashMap<String, ChartMount>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self {
            mounts: HashMap::new(),
        }
    }

    /// Mount a chart, disposing any previous mount under the same id first.
    /// Returns true when an earlier mount was replaced.
    pub fn mount(&mut self, dom_id: &str, dataset: Vec<ChartSlice>) -> bool {
        let replaced = self.dispose(dom_id);
        self.mounts
            .insert(dom_id.to_string(), ChartMount::new(dom_id, dataset));
        replaced
    }

    /// Swap in a new dataset on every mounted chart.
    pub fn replace_all(&mut self, dataset: &[ChartSlice]) {
        for mount in self.mounts.values_mut() {
            mount.replace_dataset(dataset.to_vec());
        }
    }

    pub fn get(&self, dom_id: &str) -> Option<&ChartMount> {
        self.mounts.get(dom_id)
    }

    /// Release a mount. Only the first call for a given mount returns true.
    pub fn dispose(&mut self, dom_id: &str) -> bool {
        match self.mounts.remove(dom_id) {
            Some(mount) => {
                console_log!("Disposed chart '{}' at revision {}", mount.dom_id, mount.revision);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref GLOBAL_CHART_REGISTRY: Mutex<ChartRegistry> = Mutex::new(ChartRegistry::new());
}

pub fn with_registry<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut ChartRegistry) -> R,
{
    let mut registry = GLOBAL_CHART_REGISTRY
        .lock()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(f(&mut registry))
}
