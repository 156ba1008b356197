//! Shared test backend: a recording, scriptable stand-in for the HTTP
//! client so integration tests can drive the full grid/cache/payment flow
//! without a live server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use pustaka::api::BookstoreApi;
use pustaka::error::{PustakaError, Result};
use pustaka::query::QueryParams;
use pustaka::types::{ListPage, Pagination, Resource};

/// One recorded list call: resource path plus the flattened parameters.
pub type ListCall = (String, String);

#[derive(Default)]
pub struct MockApi {
    pub list_calls: Mutex<Vec<ListCall>>,
    pub sub_calls: Mutex<Vec<(String, u64, String, Value)>>,
    pub list_count: AtomicUsize,
    /// Rows returned by every list call.
    pub rows: Mutex<Vec<Value>>,
    /// Record returned by `get`.
    pub record: Mutex<Value>,
    pub fail_lists: Mutex<bool>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            record: Mutex::new(json!({"id": 1})),
            ..Self::default()
        })
    }

    pub fn with_rows(rows: Vec<Value>) -> Arc<Self> {
        let api = Self::new();
        *api.rows.lock() = rows;
        api
    }

    pub fn set_record(&self, record: Value) {
        *self.record.lock() = record;
    }

    pub fn set_fail_lists(&self, fail: bool) {
        *self.fail_lists.lock() = fail;
    }

    pub fn list_count(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    pub fn last_list_params(&self) -> Option<String> {
        self.list_calls.lock().last().map(|(_, p)| p.clone())
    }
}

pub fn book_rows() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Matematika Kelas 4",
            "price": 45000,
            "stock": 120,
            "jenis_buku": {"code": "PAKET"},
            "jenjang_studi": {"code": "SD"},
            "penerbit": {"name": "Erlangga"}
        }),
        json!({
            "id": 2,
            "title": "IPA Kelas 5 LKS",
            "price": 15000,
            "stock": 300,
            "jenis_buku": {"code": "LKS"},
            "jenjang_studi": {"code": "SD"},
            "penerbit": {"name": "Yudhistira"}
        }),
    ]
}

pub fn credit_sale(id: u64, total: i64, paid: i64) -> Value {
    json!({
        "id": id,
        "invoice_number": format!("INV-{id:04}"),
        "status": "invoiced",
        "payment": {"method": "credit"},
        "total_amount": total,
        "paid_amount": paid
    })
}

#[async_trait]
impl BookstoreApi for MockApi {
    async fn list(&self, resource: Resource, params: &QueryParams) -> Result<ListPage> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        self.list_calls
            .lock()
            .push((resource.path().to_string(), params.to_string()));

        if *self.fail_lists.lock() {
            return Err(PustakaError::Api("backend unavailable".into()));
        }

        let rows = self.rows.lock().clone();
        let total = rows.len() as u64;
        Ok(ListPage {
            rows,
            pagination: Pagination {
                total,
                page: params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1),
                limit: params
                    .get("limit")
                    .and_then(|l| l.parse().ok())
                    .unwrap_or(10),
                total_pages: 1,
            },
        })
    }

    async fn get(&self, _resource: Resource, _id: u64) -> Result<Value> {
        Ok(self.record.lock().clone())
    }

    async fn create(&self, _resource: Resource, body: Value) -> Result<Value> {
        Ok(body)
    }

    async fn update(&self, _resource: Resource, _id: u64, body: Value) -> Result<Value> {
        Ok(body)
    }

    async fn delete(&self, _resource: Resource, _id: u64) -> Result<()> {
        Ok(())
    }

    async fn create_sub(
        &self,
        resource: Resource,
        id: u64,
        sub_resource: &str,
        body: Value,
    ) -> Result<Value> {
        self.sub_calls.lock().push((
            resource.path().to_string(),
            id,
            sub_resource.to_string(),
            body.clone(),
        ));
        Ok(body)
    }

    async fn upload_photo(
        &self,
        _resource: Resource,
        _id: u64,
        _file_name: String,
        _bytes: Vec<u8>,
    ) -> Result<Value> {
        Ok(json!({}))
    }

    async fn delete_photo(&self, _resource: Resource, _id: u64) -> Result<()> {
        Ok(())
    }
}
