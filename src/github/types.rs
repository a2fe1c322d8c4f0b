use serde::{Deserialize, Serialize};

/// One artifact attached to a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// Artifact name, used as the archive file stem
    pub name: String,
    /// Authenticated URL serving the zip archive
    #[serde(rename = "archive_download_url")]
    pub download_url: String,
    /// Archive size reported by the API
    #[serde(default)]
    pub size_in_bytes: Option<u64>,
    /// Whether the artifact has passed its retention period
    #[serde(default)]
    pub expired: bool,
}

/// Response from GitHub API for a run's artifacts.
#[derive(Debug, Deserialize)]
pub(super) struct ArtifactsResponse {
    pub artifacts: Vec<ArtifactDescriptor>,
}
