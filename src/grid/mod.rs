//! Grid orchestrator: owns sort/filter/pagination state, drives fetches
//! through the query cache, and keeps the last-known-good rows on screen.
//!
//! Fetches are split-phase so the single UI thread can interleave them:
//! `begin_refresh` tags the request with a monotonically increasing sequence
//! number and `complete_refresh` installs the result only if no later
//! request was issued in the meantime (last-request-wins by issuance order,
//! not resolution order).

pub mod columns;
pub mod render;

pub use columns::{ColumnSpec, FilterKind, Pinned, display_value, field_value};

use serde_json::Value;

use crate::cache::QueryCache;
use crate::error::Result;
use crate::query::{
    FilterState, FilterValue, QueryParams, SortDirection, SortState, map_to_query_params,
};
use crate::types::{ListPage, Pagination, Resource};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Receiver for filter changes pushed by per-column filter controls.
///
/// `value: None` is an explicit clear: the mapper must drop the key rather
/// than send an empty-string filter.
pub trait FilterHost {
    fn notify_filter_changed(&mut self, field: &str, value: Option<FilterValue>);
}

/// Handle for one issued fetch. The sequence number decides whether the
/// eventual result is still current when it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub resource: Resource,
    pub params: QueryParams,
}

pub struct GridState {
    resource: Resource,
    columns: Vec<ColumnSpec>,
    filters: FilterState,
    sort: Option<SortState>,
    page: u32,
    limit: u32,

    rows: Vec<Value>,
    pagination: Option<Pagination>,
    /// Non-blocking indicator; last-good rows stay visible while set.
    error: Option<String>,

    /// Sequence number of the most recently issued fetch.
    seq: u64,
    /// True from issuance of the latest fetch until its result (or error)
    /// lands.
    pending: bool,
}

impl GridState {
    pub fn new(resource: Resource, columns: Vec<ColumnSpec>) -> Self {
        Self {
            resource,
            columns,
            filters: FilterState::new(),
            sort: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            rows: Vec::new(),
            pagination: None,
            error: None,
            seq: 0,
            pending: false,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Header click. The active column flips direction; any other sortable
    /// column replaces the sort (single-column only — selecting a second
    /// column never stacks). Clicks on non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, field: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.field == field && c.sortable);
        if !sortable {
            return;
        }

        self.sort = match self.sort.take() {
            Some(current) if current.field == field => Some(SortState {
                field: current.field,
                direction: current.direction.flipped(),
            }),
            _ => Some(SortState {
                field: field.to_string(),
                direction: SortDirection::Asc,
            }),
        };
    }

    /// Back to the server's default ordering.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Replace the filter set wholesale (never merged incrementally, so a
    /// removed key cannot linger) and jump back to the first page.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.page = 1;
    }

    /// Apply a single-column change coming from a filter control. Returns
    /// false when the value is unchanged — that case must not trigger a
    /// fetch.
    pub fn apply_filter_change(&mut self, field: &str, value: Option<FilterValue>) -> bool {
        let current = self.filters.get(field);
        let unchanged = match (&value, current) {
            (None, None) => true,
            (Some(new), Some(old)) => new == old,
            _ => false,
        };
        if unchanged {
            return false;
        }

        let mut next = self.filters.clone();
        match value {
            Some(v) => {
                next.insert(field.to_string(), v);
            }
            None => {
                next.remove(field);
            }
        }
        self.set_filters(next);
        true
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Current query parameters; same state always yields identical params.
    pub fn query_params(&self) -> QueryParams {
        map_to_query_params(
            self.resource,
            &self.filters,
            self.sort.as_ref(),
            self.page,
            self.limit,
        )
    }

    /// Issue a fetch. The previous rows stay visible until the result lands
    /// (stale-while-revalidate); only the pending flag changes here.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.seq += 1;
        self.pending = true;
        FetchTicket {
            seq: self.seq,
            resource: self.resource,
            params: self.query_params(),
        }
    }

    /// Land a fetch result. Returns true when the result was applied;
    /// results from superseded sequence numbers are discarded wholesale,
    /// including their errors.
    pub fn complete_refresh(&mut self, seq: u64, result: Result<ListPage>) -> bool {
        if seq != self.seq {
            return false;
        }
        self.pending = false;
        match result {
            Ok(page) => {
                self.rows = page.rows;
                self.pagination = Some(page.pagination);
                self.error = None;
            }
            Err(e) => {
                // Keep last-good rows; surface a non-blocking indicator.
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Sequential begin+fetch+complete, for callers without an event loop.
    pub async fn refresh(&mut self, cache: &QueryCache) -> bool {
        let ticket = self.begin_refresh();
        let result = cache.fetch(ticket.resource, &ticket.params).await;
        self.complete_refresh(ticket.seq, result)
    }

    /// Explicit user refresh: bypasses the retained cache entry.
    pub async fn force_refresh(&mut self, cache: &QueryCache) -> bool {
        let ticket = self.begin_refresh();
        let result = cache.refetch(ticket.resource, &ticket.params).await;
        self.complete_refresh(ticket.seq, result)
    }
}

impl FilterHost for GridState {
    fn notify_filter_changed(&mut self, field: &str, value: Option<FilterValue>) {
        self.apply_filter_change(field, value);
    }
}
