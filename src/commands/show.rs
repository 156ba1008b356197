use crate::cache::QueryCache;
use crate::error::Result;
use crate::types::Resource;

/// Print a single record as pretty JSON.
pub async fn cmd_show(cache: &QueryCache, resource: Resource, id: u64) -> Result<()> {
    let record = cache.api().get(resource, id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
