use std::fs;
use std::path::Path;

use crate::cache::QueryCache;
use crate::error::{PustakaError, Result};
use crate::types::Resource;

/// Upload a record's photo from a local file.
pub async fn cmd_photo_upload(
    cache: &QueryCache,
    resource: Resource,
    id: u64,
    path: &Path,
) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PustakaError::Other(format!("invalid file path: {}", path.display())))?
        .to_string();
    let bytes = fs::read(path)?;

    cache.upload_photo(resource, id, file_name, bytes).await?;
    println!("uploaded photo for {} {}", resource, id);
    Ok(())
}

/// Remove a record's photo.
pub async fn cmd_photo_rm(cache: &QueryCache, resource: Resource, id: u64) -> Result<()> {
    cache.delete_photo(resource, id).await?;
    println!("removed photo for {} {}", resource, id);
    Ok(())
}
