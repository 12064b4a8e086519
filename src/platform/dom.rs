//! Document surface: element lookup by identifier, class-list mutation,
//! text and input-value access. The presentation never touches real layout
//! or styling; visual state is expressed purely through class membership.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use crate::placement::Marker;

/// Minimal document collaborator consumed by the presentation.
///
/// All mutating operations on a missing element are silent no-ops (with
/// best-effort debug logging); a missing target must never halt the
/// presentation.
pub trait Dom: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    fn add_class(&self, id: &str, class: &str);
    fn remove_class(&self, id: &str, class: &str);
    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_text(&self, id: &str, text: &str);
    fn text(&self, id: &str) -> Option<String>;

    /// Current value of an input element; empty string if missing.
    fn input_value(&self, id: &str) -> String;
    fn set_input_value(&self, id: &str, value: &str);

    /// Append a candle marker node under `container_id`.
    fn append_candle(&self, container_id: &str, marker: &Marker);
}

#[derive(Debug, Default, Clone)]
struct ElementState {
    classes: BTreeSet<String>,
    text: String,
    value: String,
}

/// In-memory document used by tests and the demo binary.
///
/// Elements must be registered up front ([`InMemoryDom::with_elements`]);
/// appended candles are recorded per container so tests can assert on them.
pub struct InMemoryDom {
    elements: Mutex<HashMap<String, ElementState>>,
    candles: Mutex<Vec<(String, Marker)>>,
}

impl InMemoryDom {
    pub fn new() -> Self {
        InMemoryDom {
            elements: Mutex::new(HashMap::new()),
            candles: Mutex::new(Vec::new()),
        }
    }

    pub fn with_elements(ids: &[&str]) -> Self {
        let dom = Self::new();
        for id in ids {
            dom.register(id);
        }
        dom
    }

    pub fn register(&self, id: &str) {
        self.elements
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default();
    }

    /// Snapshot of an element's classes, sorted; `None` if unregistered.
    pub fn classes(&self, id: &str) -> Option<Vec<String>> {
        self.elements
            .lock()
            .unwrap()
            .get(id)
            .map(|e| e.classes.iter().cloned().collect())
    }

    /// Candles appended so far, in insertion order.
    pub fn candles(&self) -> Vec<(String, Marker)> {
        self.candles.lock().unwrap().clone()
    }
}

impl Default for InMemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for InMemoryDom {
    fn has_element(&self, id: &str) -> bool {
        self.elements.lock().unwrap().contains_key(id)
    }

    fn add_class(&self, id: &str, class: &str) {
        let mut els = self.elements.lock().unwrap();
        match els.get_mut(id) {
            Some(e) => {
                e.classes.insert(class.to_string());
            }
            None => log::debug!("add_class on missing element {id}"),
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        let mut els = self.elements.lock().unwrap();
        match els.get_mut(id) {
            Some(e) => {
                e.classes.remove(class);
            }
            None => log::debug!("remove_class on missing element {id}"),
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .lock()
            .unwrap()
            .get(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn set_text(&self, id: &str, text: &str) {
        let mut els = self.elements.lock().unwrap();
        match els.get_mut(id) {
            Some(e) => e.text = text.to_string(),
            None => log::debug!("set_text on missing element {id}"),
        }
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.lock().unwrap().get(id).map(|e| e.text.clone())
    }

    fn input_value(&self, id: &str) -> String {
        self.elements
            .lock()
            .unwrap()
            .get(id)
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn set_input_value(&self, id: &str, value: &str) {
        let mut els = self.elements.lock().unwrap();
        match els.get_mut(id) {
            Some(e) => e.value = value.to_string(),
            None => log::debug!("set_input_value on missing element {id}"),
        }
    }

    fn append_candle(&self, container_id: &str, marker: &Marker) {
        if !self.has_element(container_id) {
            log::debug!("append_candle on missing container {container_id}");
            return;
        }
        self.candles
            .lock()
            .unwrap()
            .push((container_id.to_string(), marker.clone()));
    }
}
