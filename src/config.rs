use std::path::PathBuf;

use url::Url;

#[cfg(test)]
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const OWNER: &str = "krogertechnology";
pub const REPO: &str = "esperanto";
pub const DEFAULT_OUTPUT_DIR: &str = "./test";
/// Only the first page is ever requested.
pub const PER_PAGE: u8 = 100;

/// Settings for a single artifact download run.
///
/// Resolved once in `main` and handed to the downloader; nothing below the
/// program boundary reads the environment or argv.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub REST API base URL
    pub api_base_url: Url,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Directory archives are written into; must already exist
    pub output_dir: PathBuf,
    /// Page size for the artifact listing
    pub per_page: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API URL is valid"),
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            per_page: PER_PAGE,
        }
    }
}

impl Config {
    /// Points the configuration at a different API host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` is not an absolute URL that can
    /// carry path segments.
    #[cfg(test)]
    pub fn with_api_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL cannot be a base: {base_url}"
            )));
        }
        self.api_base_url = url;
        Ok(self)
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}
