use std::str::FromStr;

use serde_json::{Value, json};

use crate::cache::QueryCache;
use crate::commands::interactive::confirm;
use crate::error::{PustakaError, Result};
use crate::grid::field_value;
use crate::types::{Resource, TransactionStatus};
use crate::ui::request_delete;

fn parse_body(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(PustakaError::Other(
            "record body must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

/// Create a record from a JSON body and print its id.
pub async fn cmd_create(cache: &QueryCache, resource: Resource, body: &str) -> Result<()> {
    let record = cache.create(resource, parse_body(body)?).await?;
    match record.get("id") {
        Some(id) => println!("{}", id),
        None => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

/// Apply a partial JSON update to a record.
pub async fn cmd_update(cache: &QueryCache, resource: Resource, id: u64, body: &str) -> Result<()> {
    cache.update(resource, id, parse_body(body)?).await?;
    println!("updated {} {}", resource, id);
    Ok(())
}

/// Advance a transaction's lifecycle status.
pub async fn cmd_status(
    cache: &QueryCache,
    resource: Resource,
    id: u64,
    status: TransactionStatus,
) -> Result<()> {
    if !resource.is_transactional() {
        return Err(PustakaError::Other(format!(
            "{} records have no transaction status",
            resource
        )));
    }
    cache
        .update(resource, id, json!({"status": status.to_string()}))
        .await?;
    println!("{} {} is now {}", resource, id, status);
    Ok(())
}

fn record_status(resource: Resource, record: &Value) -> Option<TransactionStatus> {
    if !resource.is_transactional() {
        return None;
    }
    field_value(record, "status")
        .and_then(Value::as_str)
        .and_then(|s| TransactionStatus::from_str(s).ok())
}

/// Delete a record after confirmation.
///
/// The record is fetched first so the prompt can warn about the stock
/// reversal on completed transactions. `--yes` answers the prompt, it does
/// not skip building it.
pub async fn cmd_delete(cache: &QueryCache, resource: Resource, id: u64, yes: bool) -> Result<()> {
    let record = cache.api().get(resource, id).await?;
    let prompt = request_delete(id, record_status(resource, &record));

    if !yes && !confirm(&prompt.message())? {
        println!("aborted");
        return Ok(());
    }

    cache.delete(resource, prompt.confirm()).await?;
    println!("deleted {} {}", resource, id);
    Ok(())
}
