//! Model artifact retrieval
//!
//! Artifacts live in remote storage under opaque IDs. They are fetched into
//! their local path once, then always deserialized from disk.

pub mod http;
pub mod loader;

pub use http::HttpFetcher;
pub use loader::{ArtifactLoader, LoadedArtifacts};

use std::path::Path;

use crate::{PlayStatsError, Result};

/// Trait for anything that can download an artifact by remote ID
pub trait Fetcher {
    fn fetch(&self, remote_id: &str) -> Result<Vec<u8>>;
}

/// Fetch `remote_id` into `path` unless the file is already there.
///
/// Returns `true` when a download happened. The file is only created once the
/// full payload has been received.
pub fn ensure_local<F: Fetcher + ?Sized>(
    fetcher: &F,
    remote_id: &str,
    path: &Path,
) -> Result<bool> {
    if path.exists() {
        log::debug!("Artifact {} already present", path.display());
        return Ok(false);
    }
    if remote_id.trim().is_empty() {
        return Err(PlayStatsError::Config(format!(
            "{} is missing and no remote ID is configured; run `playstats train` \
             or set the artifact IDs in config.toml",
            path.display()
        )));
    }

    log::info!("Fetching artifact {} into {}", remote_id, path.display());
    let bytes = fetcher.fetch(remote_id)?;
    if bytes.is_empty() {
        return Err(PlayStatsError::Artifact {
            path: path.display().to_string(),
            message: format!("remote artifact {} is empty", remote_id),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let partial = path.with_extension("part");
    std::fs::write(&partial, &bytes)?;
    std::fs::rename(&partial, path)?;

    log::info!("Stored {} bytes at {}", bytes.len(), path.display());
    Ok(true)
}
