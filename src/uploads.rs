//! Stores uploaded images under the configured uploads directory and returns
//! the relative filename recorded on the owning record.

use std::path::Path;

use crate::error::AppResult;

/// Persists `bytes` under `dir`, deriving the filename from the owning
/// resource kind, its name field, and the client-supplied filename:
/// `{kind}_{name}_{original_filename}`.
///
/// The directory is created on first use. Two concurrent uploads deriving
/// the same filename overwrite each other (accepted limitation). Content
/// type and size are not validated here; the global request body limit is
/// the only cap.
pub async fn store_upload(
    dir: &Path,
    kind: &str,
    name: &str,
    original_filename: &str,
    bytes: &[u8],
) -> AppResult<String> {
    let filename = derive_filename(kind, name, original_filename);
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&filename), bytes).await?;
    tracing::debug!("stored upload {} ({} bytes)", filename, bytes.len());
    Ok(filename)
}

fn derive_filename(kind: &str, name: &str, original_filename: &str) -> String {
    format!("{}_{}_{}", kind, name, original_filename)
}
