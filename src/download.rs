use std::path::{Path, PathBuf};

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::github::{ArtifactDescriptor, GitHubClient};
use crate::output::DownloadProgress;

/// An archive that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Archives written by a run that completed without errors.
#[derive(Debug, Default)]
pub struct RunReport {
    pub run_id: String,
    pub written: Vec<WrittenArtifact>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.written.len()
    }

    pub fn total_bytes(&self) -> usize {
        self.written.iter().map(|a| a.bytes).sum()
    }
}

/// Writes an archive to `<dir>/<name>.zip`, replacing any existing file.
///
/// The directory is not created; it must already exist.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be written.
pub async fn write_artifact(buffer: &[u8], name: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.zip"));

    tokio::fs::write(&path, buffer)
        .await
        .map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

    debug!("Wrote {} bytes to {}", buffer.len(), path.display());
    Ok(path)
}

/// Fetches one artifact and writes it into `dir`.
///
/// # Errors
///
/// Returns the fetch error or the write error, whichever happens first.
pub async fn download_artifact(
    client: &GitHubClient,
    artifact: &ArtifactDescriptor,
    dir: &Path,
) -> Result<WrittenArtifact> {
    if artifact.expired {
        warn!(
            "Artifact {} is marked expired, downloading anyway",
            artifact.name
        );
    }

    let buffer = client.fetch_artifact(&artifact.download_url).await?;
    let path = write_artifact(&buffer, &artifact.name, dir).await?;

    Ok(WrittenArtifact {
        name: artifact.name.clone(),
        path,
        bytes: buffer.len(),
    })
}

/// Downloads every artifact of a workflow run into one directory.
pub struct ArtifactDownloader {
    client: GitHubClient,
    output_dir: PathBuf,
}

impl ArtifactDownloader {
    pub fn new(client: GitHubClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Lists the run's artifacts and downloads all of them concurrently.
    ///
    /// Each download runs in its own task with no concurrency limit. The first
    /// failure is returned as soon as it happens; downloads still in flight are
    /// not cancelled and keep writing their archives.
    ///
    /// # Errors
    ///
    /// Returns the listing error, in which case no download is started, or
    /// [`Error::Incomplete`] wrapping the first artifact failure.
    pub async fn download_all(
        &self,
        run_id: &str,
        progress: &DownloadProgress,
    ) -> Result<RunReport> {
        info!("Fetching artifact info for run {run_id}");

        let artifacts = self.client.list_artifacts(run_id).await?;
        let total = artifacts.len();

        info!(
            "Run {run_id} has {total} artifacts, downloading to {}",
            self.output_dir.display()
        );
        progress.start_downloads(total);

        let mut pending: FuturesUnordered<_> = artifacts
            .into_iter()
            .map(|artifact| {
                let client = self.client.clone();
                let output_dir = self.output_dir.clone();
                let progress = progress.clone();
                let name = artifact.name.clone();

                let handle = tokio::spawn(async move {
                    let outcome = download_artifact(&client, &artifact, &output_dir).await;
                    progress.artifact_finished(&artifact.name);
                    outcome
                });

                async move { (name, handle.await) }
            })
            .collect();

        let mut report = RunReport {
            run_id: run_id.to_string(),
            written: Vec::with_capacity(total),
        };

        // Dropping `pending` on early return detaches the remaining tasks
        // rather than aborting them.
        while let Some((name, joined)) = pending.next().await {
            match joined.map_err(Error::from).and_then(|outcome| outcome) {
                Ok(written) => report.written.push(written),
                Err(source) => {
                    error!("Failed to download artifact {name}: {source}");
                    return Err(Error::Incomplete {
                        run_id: run_id.to_string(),
                        artifact: name,
                        completed: report.written.len(),
                        total,
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(report)
    }
}
