//! Fingerprint-keyed query cache shared across all grids.
//!
//! Two jobs: coalesce identical in-flight list fetches (several filter
//! fields changing within one UI tick must not cause a request storm), and
//! retain the last successful page per query so a grid can keep stale rows
//! on screen while a different key revalidates.
//!
//! List entries are never expired by time. They are dropped only by
//! [`QueryCache::invalidate`], which the mutation helpers call after a
//! successful create/update/delete on the same resource.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::api::BookstoreApi;
use crate::error::{PustakaError, Result};
use crate::query::{QueryParams, fingerprint};
use crate::types::{ListPage, Resource};

/// Composite cache key: resource path plus the query fingerprint, so
/// invalidation can match all of one resource's entries by prefix.
fn cache_key(resource: Resource, params: &QueryParams) -> String {
    format!("{}:{}", resource.path(), fingerprint(resource, params))
}

fn resource_prefix(resource: Resource) -> String {
    format!("{}:", resource.path())
}

/// Outcome of one in-flight fetch, shared by every coalesced waiter. The
/// error keeps only its message; the concrete variant does not survive
/// coalescing.
type SharedFetch = std::result::Result<ListPage, String>;

pub struct QueryCache {
    api: Arc<dyn BookstoreApi>,
    last_good: DashMap<String, ListPage>,
    in_flight: DashMap<String, Arc<OnceCell<SharedFetch>>>,
}

impl QueryCache {
    pub fn new(api: Arc<dyn BookstoreApi>) -> Self {
        Self {
            api,
            last_good: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    /// Fetch a list page, serving the retained entry when one exists.
    ///
    /// Cache miss goes to the backend; concurrent callers with an identical
    /// key subscribe to the same in-flight request instead of issuing a
    /// duplicate. One backend attempt resolves every waiter, success or
    /// failure; the cell is then dropped so the next explicit retrigger
    /// retries. There is no automatic retry.
    pub async fn fetch(&self, resource: Resource, params: &QueryParams) -> Result<ListPage> {
        let key = cache_key(resource, params);
        if let Some(entry) = self.last_good.get(&key) {
            return Ok(entry.clone());
        }
        self.fetch_inner(resource, params, key).await
    }

    /// Fetch bypassing the retained entry (explicit user refresh).
    pub async fn refetch(&self, resource: Resource, params: &QueryParams) -> Result<ListPage> {
        let key = cache_key(resource, params);
        self.last_good.remove(&key);
        self.fetch_inner(resource, params, key).await
    }

    async fn fetch_inner(
        &self,
        resource: Resource,
        params: &QueryParams,
        key: String,
    ) -> Result<ListPage> {
        let cell = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        // get_or_init runs the backend call exactly once per cell; a failed
        // attempt is stored too, so waiters share the failure instead of
        // serially re-issuing the request.
        let result = cell
            .get_or_init(|| async {
                self.api
                    .list(resource, params)
                    .await
                    .map_err(|e| e.to_string())
            })
            .await
            .clone();

        self.in_flight.remove(&key);

        match result {
            Ok(page) => {
                self.last_good.insert(key, page.clone());
                Ok(page)
            }
            Err(message) => Err(PustakaError::Api(message)),
        }
    }

    /// Last successful page for this exact query, if any.
    pub fn last_good(&self, resource: Resource, params: &QueryParams) -> Option<ListPage> {
        self.last_good
            .get(&cache_key(resource, params))
            .map(|e| e.clone())
    }

    /// Drop every retained entry for a resource. Entries for other
    /// resources are untouched.
    pub fn invalidate(&self, resource: Resource) {
        let prefix = resource_prefix(resource);
        self.last_good.retain(|key, _| !key.starts_with(&prefix));
    }

    pub fn len(&self) -> usize {
        self.last_good.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_good.is_empty()
    }

    // Mutation helpers. Each delegates to the backend and, on success,
    // invalidates the resource's list entries so every subscriber re-fetches
    // on its next render.

    pub async fn create(&self, resource: Resource, body: Value) -> Result<Value> {
        let record = self.api.create(resource, body).await?;
        self.invalidate(resource);
        Ok(record)
    }

    pub async fn update(&self, resource: Resource, id: u64, body: Value) -> Result<Value> {
        let record = self.api.update(resource, id, body).await?;
        self.invalidate(resource);
        Ok(record)
    }

    pub async fn delete(&self, resource: Resource, id: u64) -> Result<()> {
        self.api.delete(resource, id).await?;
        self.invalidate(resource);
        Ok(())
    }

    pub async fn create_sub(
        &self,
        resource: Resource,
        id: u64,
        sub_resource: &str,
        body: Value,
    ) -> Result<Value> {
        let record = self.api.create_sub(resource, id, sub_resource, body).await?;
        self.invalidate(resource);
        Ok(record)
    }

    pub async fn upload_photo(
        &self,
        resource: Resource,
        id: u64,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let record = self.api.upload_photo(resource, id, file_name, bytes).await?;
        self.invalidate(resource);
        Ok(record)
    }

    pub async fn delete_photo(&self, resource: Resource, id: u64) -> Result<()> {
        self.api.delete_photo(resource, id).await?;
        self.invalidate(resource);
        Ok(())
    }

    pub fn api(&self) -> &Arc<dyn BookstoreApi> {
        &self.api
    }
}
