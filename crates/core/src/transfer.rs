//! Streaming file transfer reporting progress through shared counters.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use anyhow::{Context as _, Result};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Download `source` into `dest`, streaming chunks to disk.
///
/// `total` is set once from the response's content length (0 when the
/// server does not report one); `current` advances per chunk. Both are
/// written with relaxed ordering: the values only ever grow, so a stale
/// read on the sampling side under-reports progress but never corrupts
/// it.
pub async fn download_file(
    source: String,
    dest: PathBuf,
    current: Arc<AtomicU64>,
    total: Arc<AtomicU64>,
) -> Result<()> {
    let response = reqwest::get(&source)
        .await
        .with_context(|| format!("failed to request {source}"))?
        .error_for_status()
        .with_context(|| format!("server rejected {source}"))?;

    if let Some(length) = response.content_length() {
        total.store(length, Ordering::Relaxed);
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut file = tokio::fs::File::create(&dest)
        .await
        .with_context(|| format!("failed to create {}", dest.display()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("stream error while reading {source}"))?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("failed to write {}", dest.display()))?;
        current.fetch_add(chunk.len() as u64, Ordering::Relaxed);
    }

    file.flush()
        .await
        .with_context(|| format!("failed to flush {}", dest.display()))?;

    info!(
        source = %source,
        dest = %dest.display(),
        bytes = current.load(Ordering::Relaxed),
        "transfer complete"
    );
    Ok(())
}
