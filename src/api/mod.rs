//! REST backend collaborator.
//!
//! The backend is consumed, not re-specified: list endpoints take flat
//! `{page, limit, sort_by, sort_order, <field>[_min|_max]}` parameters and
//! return `{<resource_plural>: [...], pagination: {...}}`; mutations take a
//! JSON body and return the persisted record or `{error}` on failure.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::query::QueryParams;
use crate::types::{ListPage, Resource};

pub use client::HttpApi;

/// Object-safe interface over the bookstore REST backend.
///
/// The query cache and the grid hold this as a trait object so tests can
/// substitute a recording mock for the wire client.
#[async_trait]
pub trait BookstoreApi: Send + Sync {
    /// Fetch one page of a resource's list endpoint.
    async fn list(&self, resource: Resource, params: &QueryParams) -> Result<ListPage>;

    /// Fetch a single record by id.
    async fn get(&self, resource: Resource, id: u64) -> Result<Value>;

    /// Create a record; returns the persisted record.
    async fn create(&self, resource: Resource, body: Value) -> Result<Value>;

    /// Update a record; returns the persisted record.
    async fn update(&self, resource: Resource, id: u64, body: Value) -> Result<Value>;

    /// Delete a record.
    async fn delete(&self, resource: Resource, id: u64) -> Result<()>;

    /// Create a sub-resource record, e.g. `POST /sales/{id}/installments`.
    async fn create_sub(
        &self,
        resource: Resource,
        id: u64,
        sub_resource: &str,
        body: Value,
    ) -> Result<Value>;

    /// Upload a photo via `POST /upload/{resource}/photo/{id}` (multipart
    /// form field `file`).
    async fn upload_photo(
        &self,
        resource: Resource,
        id: u64,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Value>;

    /// Remove a previously uploaded photo (`DELETE` on the upload path).
    async fn delete_photo(&self, resource: Resource, id: u64) -> Result<()>;
}
