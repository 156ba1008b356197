pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod grid;
pub mod payment;
pub mod query;
pub mod types;
pub mod ui;

pub use api::{BookstoreApi, HttpApi};
pub use cache::QueryCache;
pub use config::{Config, UiPrefs};
pub use error::{PustakaError, Result};
pub use grid::{ColumnSpec, FetchTicket, FilterHost, FilterKind, GridState, Pinned};
pub use payment::{PaymentError, PaymentOutcome, apply_payment, remaining_balance, validate_payment};
pub use query::{
    FilterState, FilterValue, QueryParams, SortDirection, SortState, backend_field, fingerprint,
    map_to_query_params,
};
pub use types::{
    ListPage, Pagination, PaymentMethod, Resource, TransactionStatus, VALID_STATUSES,
};
