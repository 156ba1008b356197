mod config;
mod interactive;
pub mod ls;
mod mutate;
mod pay;
mod photo;
mod show;

pub use config::{cmd_config_set, cmd_config_show};
pub use ls::cmd_ls;
pub use mutate::{cmd_create, cmd_delete, cmd_status, cmd_update};
pub use pay::cmd_pay;
pub use photo::{cmd_photo_rm, cmd_photo_upload};
pub use show::cmd_show;

use std::str::FromStr;
use std::sync::Arc;

use jiff::civil::Date;
use secrecy::SecretString;

use crate::api::HttpApi;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::{PustakaError, Result};
use crate::query::FilterValue;

/// Build the shared query cache from the persisted configuration.
pub fn build_cache() -> Result<QueryCache> {
    let config = Config::load()?;
    let base_url = config.base_url.parse()?;
    let token = config.token().map(SecretString::from);
    let api = HttpApi::new(base_url, token, config.timeout_secs)?;
    Ok(QueryCache::new(Arc::new(api)))
}

/// Parse a `field=value` filter argument.
///
/// Forms accepted:
/// - `field=lo..hi` numeric or ISO-date range
/// - `field=lo..` / `field=..hi` open-ended range
/// - `field==value` exact match
/// - `field=value` substring match
pub fn parse_filter_arg(arg: &str) -> Result<(String, FilterValue)> {
    let Some((field, raw)) = arg.split_once('=') else {
        return Err(PustakaError::InvalidFilter(
            arg.to_string(),
            "expected field=value".to_string(),
        ));
    };
    if field.is_empty() {
        return Err(PustakaError::InvalidFilter(
            arg.to_string(),
            "empty field name".to_string(),
        ));
    }

    if let Some(exact) = raw.strip_prefix('=') {
        return Ok((field.to_string(), FilterValue::equals(exact)));
    }

    if let Some((lo, hi)) = raw.split_once("..") {
        return Ok((field.to_string(), parse_range(arg, lo, hi)?));
    }

    Ok((field.to_string(), FilterValue::text(raw)))
}

fn parse_range(arg: &str, lo: &str, hi: &str) -> Result<FilterValue> {
    use crate::query::{DateOp, NumberOp};

    if lo.is_empty() && hi.is_empty() {
        return Err(PustakaError::InvalidFilter(
            arg.to_string(),
            "range needs at least one bound".to_string(),
        ));
    }

    // Numeric bounds win; anything non-numeric must parse as an ISO date.
    let numeric =
        (lo.is_empty() || f64::from_str(lo).is_ok()) && (hi.is_empty() || f64::from_str(hi).is_ok());
    if numeric {
        return Ok(match (lo.is_empty(), hi.is_empty()) {
            (false, false) => FilterValue::number_between(parse_f64(arg, lo)?, parse_f64(arg, hi)?),
            (false, true) => FilterValue::number(NumberOp::Gt, parse_f64(arg, lo)?),
            (true, false) => FilterValue::number(NumberOp::Lt, parse_f64(arg, hi)?),
            (true, true) => unreachable!(),
        });
    }

    Ok(match (lo.is_empty(), hi.is_empty()) {
        (false, false) => FilterValue::date_between(parse_date(arg, lo)?, parse_date(arg, hi)?),
        (false, true) => FilterValue::Date {
            op: DateOp::After,
            date: parse_date(arg, lo)?,
            date_to: None,
        },
        (true, false) => FilterValue::Date {
            op: DateOp::Before,
            date: parse_date(arg, hi)?,
            date_to: None,
        },
        (true, true) => unreachable!(),
    })
}

fn parse_f64(arg: &str, s: &str) -> Result<f64> {
    f64::from_str(s)
        .map_err(|e| PustakaError::InvalidFilter(arg.to_string(), e.to_string()))
}

fn parse_date(arg: &str, s: &str) -> Result<Date> {
    Date::from_str(s).map_err(|e| PustakaError::InvalidFilter(arg.to_string(), e.to_string()))
}
