use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PustakaError;

/// Backend-managed entity collections exposed via list+CRUD endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Books,
    Publishers,
    Curricula,
    Cities,
    Expeditions,
    Users,
    Sales,
    Purchases,
}

impl Resource {
    /// Path segment used in REST URLs, e.g. `/books`.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Books => "books",
            Resource::Publishers => "publishers",
            Resource::Curricula => "curricula",
            Resource::Cities => "cities",
            Resource::Expeditions => "expeditions",
            Resource::Users => "users",
            Resource::Sales => "sales",
            Resource::Purchases => "purchases",
        }
    }

    /// Key under which the list endpoint nests its rows.
    pub fn plural_key(&self) -> &'static str {
        match self {
            Resource::Books => "books",
            Resource::Publishers => "publishers",
            Resource::Curricula => "curricula",
            Resource::Cities => "cities",
            Resource::Expeditions => "expeditions",
            Resource::Users => "users",
            Resource::Sales => "sales_transactions",
            Resource::Purchases => "purchase_transactions",
        }
    }

    /// Whether rows of this resource carry a transaction status field.
    pub fn is_transactional(&self) -> bool {
        matches!(self, Resource::Sales | Resource::Purchases)
    }

    pub const ALL: &[Resource] = &[
        Resource::Books,
        Resource::Publishers,
        Resource::Curricula,
        Resource::Cities,
        Resource::Expeditions,
        Resource::Users,
        Resource::Sales,
        Resource::Purchases,
    ];
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Resource {
    type Err = PustakaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "books" | "book" => Ok(Resource::Books),
            "publishers" | "publisher" => Ok(Resource::Publishers),
            "curricula" | "curriculum" => Ok(Resource::Curricula),
            "cities" | "city" => Ok(Resource::Cities),
            "expeditions" | "expedition" => Ok(Resource::Expeditions),
            "users" | "user" => Ok(Resource::Users),
            "sales" | "sale" => Ok(Resource::Sales),
            "purchases" | "purchase" => Ok(Resource::Purchases),
            _ => Err(PustakaError::UnknownResource(s.to_string())),
        }
    }
}

/// Lifecycle status of a sales or purchase transaction.
///
/// Completed is terminal: editing is gated off and deleting a completed
/// transaction reverses the inventory adjustment server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Invoiced,
    Completed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Invoiced => write!(f, "invoiced"),
            TransactionStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = PustakaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "invoiced" => Ok(TransactionStatus::Invoiced),
            "completed" => Ok(TransactionStatus::Completed),
            _ => Err(PustakaError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["pending", "invoiced", "completed"];

/// How a sale is settled. Credit sales carry an outstanding balance that
/// is paid down by installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Credit,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Credit => write!(f, "credit"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PustakaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "credit" => Ok(PaymentMethod::Credit),
            _ => Err(PustakaError::Other(format!(
                "invalid payment method: {}",
                s
            ))),
        }
    }
}

/// Pagination block returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// One page of schemaless rows from a list endpoint.
///
/// Rows stay as raw JSON records; columns address into them by dot-path,
/// so new backend fields flow through the grid without a schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub rows: Vec<serde_json::Value>,
    pub pagination: Pagination,
}

impl ListPage {
    pub fn empty() -> Self {
        ListPage {
            rows: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_roundtrip() {
        for resource in Resource::ALL {
            let parsed: Resource = resource.to_string().parse().unwrap();
            assert_eq!(parsed, *resource);
        }
    }

    #[test]
    fn test_resource_singular_aliases() {
        assert_eq!("book".parse::<Resource>().unwrap(), Resource::Books);
        assert_eq!("sale".parse::<Resource>().unwrap(), Resource::Sales);
    }

    #[test]
    fn test_resource_unknown() {
        assert!("invoices".parse::<Resource>().is_err());
        assert!("".parse::<Resource>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "completed".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Completed
        );
        assert_eq!(
            "PENDING".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Pending
        );
        assert!("done".parse::<TransactionStatus>().is_err());
        assert!("".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_terminal_status() {
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(!TransactionStatus::Invoiced.is_terminal());
    }

    #[test]
    fn test_transactional_resources() {
        assert!(Resource::Sales.is_transactional());
        assert!(Resource::Purchases.is_transactional());
        assert!(!Resource::Books.is_transactional());
    }
}
