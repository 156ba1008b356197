//! Per-column floating filter dropdown.
//!
//! State machine: closed → opening (load options on first open only) →
//! open → select / dismiss → closed. The option list loads exactly once per
//! component lifetime; reopening never re-fetches. Reference data changes
//! rarely, so that staleness is accepted until the holder is rebuilt — the
//! tradeoff is deliberate and local to this control.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::api::BookstoreApi;
use crate::error::Result;
use crate::grid::FilterHost;
use crate::query::{FilterState, FilterValue, map_to_query_params};
use crate::types::Resource;
use crate::ui::overlay::{OverlayEvent, Point, Rect, place_menu, should_dismiss};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        DropdownOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Source of dropdown options for a reference-data endpoint.
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn load(&self, endpoint_key: &str) -> Result<Vec<DropdownOption>>;
}

/// Injectable per-endpoint option cache.
///
/// Explicit state holder rather than module-level global, so tests can
/// build a fresh one per case. Entries live for the holder's lifetime and
/// are never invalidated automatically.
#[derive(Default)]
pub struct CachedOptions {
    entries: DashMap<String, Vec<DropdownOption>>,
}

impl CachedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(
        &self,
        endpoint_key: &str,
        source: &dyn OptionSource,
    ) -> Result<Vec<DropdownOption>> {
        if let Some(options) = self.get(endpoint_key) {
            return Ok(options);
        }
        let options = source.load(endpoint_key).await?;
        self.insert(endpoint_key, options.clone());
        Ok(options)
    }

    pub fn get(&self, endpoint_key: &str) -> Option<Vec<DropdownOption>> {
        self.entries.get(endpoint_key).map(|e| e.clone())
    }

    pub fn insert(&self, endpoint_key: &str, options: Vec<DropdownOption>) {
        self.entries.insert(endpoint_key.to_string(), options);
    }

    pub fn contains(&self, endpoint_key: &str) -> bool {
        self.entries.contains_key(endpoint_key)
    }
}

/// Option source backed by the reference-data list endpoints. Each row's
/// `code` (falling back to `id`) becomes the option value and `name` the
/// label. Loaded lists are shared across all filters via [`CachedOptions`].
pub struct ApiOptionSource {
    api: Arc<dyn BookstoreApi>,
    cache: CachedOptions,
}

impl ApiOptionSource {
    pub fn new(api: Arc<dyn BookstoreApi>) -> Self {
        Self {
            api,
            cache: CachedOptions::new(),
        }
    }

    async fn fetch(&self, endpoint_key: &str) -> Result<Vec<DropdownOption>> {
        let resource = Resource::from_str(endpoint_key)?;
        // Reference lists are small; one generously sized page covers them.
        let params = map_to_query_params(resource, &FilterState::new(), None, 1, 1000);
        let page = self.api.list(resource, &params).await?;

        Ok(page
            .rows
            .iter()
            .filter_map(|row| {
                let raw = row.get("code").or_else(|| row.get("id"))?;
                let value = match raw {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let label = row
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&value)
                    .to_string();
                Some(DropdownOption { value, label })
            })
            .collect())
    }
}

#[async_trait]
impl OptionSource for ApiOptionSource {
    async fn load(&self, endpoint_key: &str) -> Result<Vec<DropdownOption>> {
        if let Some(options) = self.cache.get(endpoint_key) {
            return Ok(options);
        }
        let options = self.fetch(endpoint_key).await?;
        self.cache.insert(endpoint_key, options.clone());
        Ok(options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMenuPhase {
    #[default]
    Closed,
    Open,
}

/// Headless state for one column's dropdown filter.
pub struct FloatingFilter {
    field: String,
    endpoint_key: Option<String>,
    menu_size: (f64, f64),

    options: Vec<DropdownOption>,
    has_loaded: bool,
    selected: Option<String>,

    phase: FilterMenuPhase,
    position: Option<Point>,
    trigger: Option<Rect>,
    menu_rect: Option<Rect>,
}

impl FloatingFilter {
    /// Filter with a static option list (no endpoint).
    pub fn with_options(field: impl Into<String>, options: Vec<DropdownOption>) -> Self {
        Self {
            field: field.into(),
            endpoint_key: None,
            menu_size: (180.0, 240.0),
            options,
            has_loaded: true,
            selected: None,
            phase: FilterMenuPhase::Closed,
            position: None,
            trigger: None,
            menu_rect: None,
        }
    }

    /// Filter whose options come from a reference-data endpoint, loaded on
    /// first open.
    pub fn with_endpoint(field: impl Into<String>, endpoint_key: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            endpoint_key: Some(endpoint_key.into()),
            menu_size: (180.0, 240.0),
            options: Vec::new(),
            has_loaded: false,
            selected: None,
            phase: FilterMenuPhase::Closed,
            position: None,
            trigger: None,
            menu_rect: None,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_open(&self) -> bool {
        self.phase == FilterMenuPhase::Open
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Open the menu at the trigger's current viewport rectangle.
    ///
    /// Position is recomputed on every open; options load only on the
    /// first (the `has_loaded` latch).
    pub async fn open(
        &mut self,
        trigger: Rect,
        viewport: Rect,
        source: &dyn OptionSource,
    ) -> Result<()> {
        if !self.has_loaded
            && let Some(key) = self.endpoint_key.clone()
        {
            self.options = source.load(&key).await?;
            self.has_loaded = true;
        }

        let position = place_menu(trigger, self.menu_size, viewport);
        self.position = Some(position);
        self.trigger = Some(trigger);
        self.menu_rect = Some(Rect::new(
            position.x,
            position.y,
            self.menu_size.0,
            self.menu_size.1,
        ));
        self.phase = FilterMenuPhase::Open;
        Ok(())
    }

    pub fn close(&mut self) {
        self.phase = FilterMenuPhase::Closed;
        self.position = None;
        self.trigger = None;
        self.menu_rect = None;
    }

    /// Select an option (`None` is the empty/"all" entry) and push the
    /// change to the host. Returns true when a filter-change event was
    /// emitted; re-selecting the current value emits nothing.
    pub fn select(&mut self, value: Option<&str>, host: &mut dyn FilterHost) -> bool {
        let emitted = if self.selected.as_deref() == value {
            false
        } else {
            self.selected = value.map(str::to_string);
            match value {
                // Equality filter for the chosen option.
                Some(v) => host.notify_filter_changed(&self.field, Some(FilterValue::equals(v))),
                // Explicit clear: the mapper drops the key entirely.
                None => host.notify_filter_changed(&self.field, None),
            }
            true
        };
        self.close();
        emitted
    }

    /// Dismissal while open: pointer-down outside trigger and menu, or a
    /// scroll outside the menu, closes with no other side effect.
    pub fn handle_event(&mut self, event: OverlayEvent) {
        if !self.is_open() {
            return;
        }
        let (Some(menu), Some(trigger)) = (self.menu_rect, self.trigger) else {
            return;
        };
        if should_dismiss(menu, trigger, event) {
            self.close();
        }
    }
}
