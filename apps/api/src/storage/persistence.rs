//! Persistence adapter: three independent records over a `KeyValueStore`.
//!
//! Every failure (store unavailable, corrupt JSON) is logged and swallowed:
//! saves become no-ops and loads report "nothing saved".

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::models::document::CvDocument;
use crate::models::template::{ColorMap, TemplateId};
use crate::storage::{KeyValueStore, StorageError};

pub const DOCUMENT_KEY: &str = "cv_builder_data";
pub const TEMPLATE_KEY: &str = "cv_builder_template";
pub const COLORS_KEY: &str = "cv_builder_colors";

#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, doc: &CvDocument) {
        self.write_json(DOCUMENT_KEY, doc);
    }

    pub fn load(&self) -> Option<CvDocument> {
        let value = self.read_json(DOCUMENT_KEY)?;
        let doc = CvDocument::from_value(value);
        if doc.is_none() {
            warn!("Saved document is not a JSON object, ignoring it");
        }
        doc
    }

    pub fn save_template_id(&self, id: TemplateId) {
        self.write_json(TEMPLATE_KEY, &id);
    }

    /// The saved template, or `Classic` when absent or unparsable.
    pub fn load_template_id(&self) -> TemplateId {
        let Some(raw) = self.read_raw(TEMPLATE_KEY) else {
            return TemplateId::default();
        };
        match raw.trim().trim_matches('"').parse::<u8>() {
            Ok(id) => TemplateId::from(id),
            Err(_) => {
                warn!("Saved template id '{raw}' is not a number, using the default");
                TemplateId::default()
            }
        }
    }

    pub fn save_color_map(&self, map: &ColorMap) {
        self.write_json(COLORS_KEY, map);
    }

    /// The saved colors merged over the defaults, or `None` when nothing usable is saved.
    pub fn load_color_map(&self) -> Option<ColorMap> {
        let Value::Object(obj) = self.read_json(COLORS_KEY)? else {
            warn!("Saved color map is not a JSON object, ignoring it");
            return None;
        };
        let saved: BTreeMap<String, String> = obj
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect();
        Some(ColorMap::merged_over_defaults(&saved))
    }

    pub fn clear(&self) {
        for key in [DOCUMENT_KEY, TEMPLATE_KEY, COLORS_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to remove '{key}': {e}");
            }
        }
    }

    /// Writes all three records on the blocking pool and returns once they have landed.
    pub async fn save_all(&self, document: CvDocument, template: TemplateId, colors: ColorMap) {
        let this = self.clone();
        let result = tokio::task::spawn_blocking(move || {
            this.save(&document);
            this.save_template_id(template);
            this.save_color_map(&colors);
        })
        .await;
        if let Err(e) = result {
            warn!("Persisting the workspace failed: {e}");
        }
    }

    /// [`Persistence::clear`] on the blocking pool.
    pub async fn clear_all(&self) {
        let this = self.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || this.clear()).await {
            warn!("Clearing saved records failed: {e}");
        }
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn write_json<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.set(key, &raw));
        if let Err(e) = result {
            warn!("Storage save of '{key}' failed: {e}");
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Storage load of '{key}' failed: {e}");
                None
            }
        }
    }

    fn read_json(&self, key: &str) -> Option<Value> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored '{key}' is not valid JSON: {e}");
                None
            }
        }
    }
}
