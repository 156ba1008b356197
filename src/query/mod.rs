//! Translation of grid-level sort/filter state into backend query parameters.
//!
//! The list endpoints accept only flat string parameters (`price_min`,
//! `price_max`, `sort_by`, ...), never operator objects, so range filters are
//! split into `_min`/`_max` pairs here. The mapping is a pure function: the
//! same filter/sort/page inputs always produce byte-identical parameters,
//! which is what makes fingerprint-based request deduplication sound.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::PustakaError;
use crate::types::Resource;

pub mod fields;
pub mod fingerprint;

pub use fields::backend_field;
pub use fingerprint::fingerprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = PustakaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(PustakaError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// Single-column sort. Selecting another column replaces this one; the UI
/// offers no multi-column affordance and the backend accepts only one
/// `sort_by`/`sort_order` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(field: impl Into<String>) -> Self {
        SortState {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberOp {
    Eq,
    Gt,
    Lt,
    Between,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOp {
    Eq,
    Before,
    After,
    Between,
}

/// Per-column filter value.
///
/// `Date { op: Eq }` forwards the literal date string; the backend performs
/// the same-day inclusive match, the client never computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterValue {
    Text {
        contains: String,
    },
    Number {
        op: NumberOp,
        value: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        value_to: Option<f64>,
    },
    Date {
        op: DateOp,
        date: Date,
        #[serde(skip_serializing_if = "Option::is_none")]
        date_to: Option<Date>,
    },
    Equality {
        value: String,
    },
}

impl FilterValue {
    pub fn text(contains: impl Into<String>) -> Self {
        FilterValue::Text {
            contains: contains.into(),
        }
    }

    pub fn equals(value: impl Into<String>) -> Self {
        FilterValue::Equality {
            value: value.into(),
        }
    }

    pub fn number(op: NumberOp, value: f64) -> Self {
        FilterValue::Number {
            op,
            value,
            value_to: None,
        }
    }

    pub fn number_between(lo: f64, hi: f64) -> Self {
        FilterValue::Number {
            op: NumberOp::Between,
            value: lo,
            value_to: Some(hi),
        }
    }

    pub fn date_between(lo: Date, hi: Date) -> Self {
        FilterValue::Date {
            op: DateOp::Between,
            date: lo,
            date_to: Some(hi),
        }
    }
}

/// Active filters keyed by UI field path. Sorted keys keep the derived
/// query parameters referentially reproducible. The grid replaces this map
/// wholesale on each filter change to avoid stale-key leaks.
pub type FilterState = BTreeMap<String, FilterValue>;

/// Flattened string parameters, the only thing sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in self.iter() {
            if !first {
                write!(f, "&")?;
            }
            write!(f, "{}={}", k, v)?;
            first = false;
        }
        Ok(())
    }
}

/// Render a filter number the way the backend expects: integral values
/// without a trailing `.0` so `10000.0` and `10000` map identically.
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Map grid state to backend query parameters.
///
/// Pure and deterministic. Malformed filter values (a Between without its
/// upper bound) are dropped with a warning rather than surfaced: they are a
/// programming error in filter construction, not a user error.
pub fn map_to_query_params(
    resource: Resource,
    filters: &FilterState,
    sort: Option<&SortState>,
    page: u32,
    limit: u32,
) -> QueryParams {
    let mut params = QueryParams::default();
    params.insert("page", page.to_string());
    params.insert("limit", limit.to_string());

    for (ui_field, value) in filters {
        let field = backend_field(resource, ui_field);
        match value {
            FilterValue::Text { contains } => {
                params.insert(field, contains.clone());
            }
            FilterValue::Equality { value } => {
                params.insert(field, value.clone());
            }
            FilterValue::Number { op, value, value_to } => match op {
                NumberOp::Eq => params.insert(field, fmt_number(*value)),
                NumberOp::Gt => params.insert(format!("{}_min", field), fmt_number(*value)),
                NumberOp::Lt => params.insert(format!("{}_max", field), fmt_number(*value)),
                NumberOp::Between => {
                    let Some(hi) = value_to else {
                        tracing::warn!(field, "between filter missing upper bound, dropping");
                        continue;
                    };
                    params.insert(format!("{}_min", field), fmt_number(*value));
                    params.insert(format!("{}_max", field), fmt_number(*hi));
                }
            },
            FilterValue::Date { op, date, date_to } => match op {
                DateOp::Eq => params.insert(field, date.to_string()),
                DateOp::After => params.insert(format!("{}_min", field), date.to_string()),
                DateOp::Before => params.insert(format!("{}_max", field), date.to_string()),
                DateOp::Between => {
                    let Some(hi) = date_to else {
                        tracing::warn!(field, "between filter missing end date, dropping");
                        continue;
                    };
                    params.insert(format!("{}_min", field), date.to_string());
                    params.insert(format!("{}_max", field), hi.to_string());
                }
            },
        }
    }

    if let Some(sort) = sort {
        params.insert("sort_by", backend_field(resource, &sort.field));
        params.insert("sort_order", sort.direction.to_string());
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn test_deterministic() {
        let mut filters = FilterState::new();
        filters.insert("title".into(), FilterValue::text("matematika"));
        filters.insert(
            "price".into(),
            FilterValue::number_between(10_000.0, 50_000.0),
        );
        let sort = SortState::asc("title");

        let a = map_to_query_params(Resource::Books, &filters, Some(&sort), 2, 25);
        let b = map_to_query_params(Resource::Books, &filters, Some(&sort), 2, 25);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_between_emits_min_max_only() {
        let mut filters = FilterState::new();
        filters.insert(
            "price".into(),
            FilterValue::number_between(10.0, 50.0),
        );
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);

        assert_eq!(params.get("price_min"), Some("10"));
        assert_eq!(params.get("price_max"), Some("50"));
        assert_eq!(params.get("price"), None);
        // page, limit, and the two range keys; nothing else
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_combined_filters_scenario() {
        let mut filters = FilterState::new();
        filters.insert("jenis_buku.code".into(), FilterValue::equals("LKS"));
        filters.insert(
            "price".into(),
            FilterValue::number_between(10_000.0, 50_000.0),
        );
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);

        assert_eq!(params.get("jenis_buku_code"), Some("LKS"));
        assert_eq!(params.get("price_min"), Some("10000"));
        assert_eq!(params.get("price_max"), Some("50000"));
    }

    #[test]
    fn test_gt_lt_split() {
        let mut filters = FilterState::new();
        filters.insert(
            "stock".into(),
            FilterValue::number(NumberOp::Gt, 5.0),
        );
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);
        assert_eq!(params.get("stock_min"), Some("5"));

        let mut filters = FilterState::new();
        filters.insert(
            "stock".into(),
            FilterValue::number(NumberOp::Lt, 100.0),
        );
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);
        assert_eq!(params.get("stock_max"), Some("100"));
    }

    #[test]
    fn test_number_eq_emits_bare_key() {
        let mut filters = FilterState::new();
        filters.insert("stock".into(), FilterValue::number(NumberOp::Eq, 12.0));
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);
        assert_eq!(params.get("stock"), Some("12"));
        assert_eq!(params.get("stock_min"), None);
    }

    #[test]
    fn test_date_filters() {
        let mut filters = FilterState::new();
        filters.insert(
            "created_at".into(),
            FilterValue::date_between(date("2024-01-01"), date("2024-06-30")),
        );
        let params = map_to_query_params(Resource::Sales, &filters, None, 1, 10);
        assert_eq!(params.get("created_at_min"), Some("2024-01-01"));
        assert_eq!(params.get("created_at_max"), Some("2024-06-30"));

        let mut filters = FilterState::new();
        filters.insert(
            "created_at".into(),
            FilterValue::Date {
                op: DateOp::Eq,
                date: date("2024-03-15"),
                date_to: None,
            },
        );
        let params = map_to_query_params(Resource::Sales, &filters, None, 1, 10);
        // The literal date is forwarded; same-day matching is server-side.
        assert_eq!(params.get("created_at"), Some("2024-03-15"));
    }

    #[test]
    fn test_no_sort_omits_sort_keys() {
        let params = map_to_query_params(Resource::Books, &FilterState::new(), None, 1, 10);
        assert_eq!(params.get("sort_by"), None);
        assert_eq!(params.get("sort_order"), None);
    }

    #[test]
    fn test_sort_maps_field_name() {
        let sort = SortState {
            field: "jenjang_studi.code".into(),
            direction: SortDirection::Desc,
        };
        let params =
            map_to_query_params(Resource::Books, &FilterState::new(), Some(&sort), 1, 10);
        assert_eq!(params.get("sort_by"), Some("jenjang_studi_code"));
        assert_eq!(params.get("sort_order"), Some("desc"));
    }

    #[test]
    fn test_malformed_between_dropped() {
        let mut filters = FilterState::new();
        filters.insert(
            "price".into(),
            FilterValue::Number {
                op: NumberOp::Between,
                value: 10.0,
                value_to: None,
            },
        );
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);
        assert_eq!(params.get("price_min"), None);
        assert_eq!(params.get("price_max"), None);
        assert_eq!(params.len(), 2); // page + limit only
    }

    #[test]
    fn test_unmapped_field_identity_fallback() {
        let mut filters = FilterState::new();
        filters.insert("brand_new_column".into(), FilterValue::equals("x"));
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);
        assert_eq!(params.get("brand_new_column"), Some("x"));
    }

    #[test]
    fn test_fmt_number_trims_integral() {
        assert_eq!(fmt_number(10000.0), "10000");
        assert_eq!(fmt_number(10.5), "10.5");
        assert_eq!(fmt_number(0.0), "0");
    }

    #[test]
    fn test_filter_value_serde_roundtrip() {
        let original = FilterValue::date_between(date("2024-01-01"), date("2024-06-30"));
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"kind\":\"date\""));
        assert!(json.contains("2024-01-01"));

        let parsed: FilterValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!(
            "DESC".parse::<SortDirection>().unwrap(),
            SortDirection::Desc
        );
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_display_is_sorted_pairs() {
        let mut filters = FilterState::new();
        filters.insert("title".into(), FilterValue::text("ipa"));
        let params = map_to_query_params(Resource::Books, &filters, None, 1, 10);
        assert_eq!(params.to_string(), "limit=10&page=1&title=ipa");
    }
}
