use std::ffi::OsString;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::info;

use crate::auth::Token;
use crate::config::Config;
use crate::download::ArtifactDownloader;
use crate::error::Error;
use crate::github::GitHubClient;
use crate::output::{self, DownloadProgress};

/// Accepts exactly one positional argument and nothing else.
#[derive(Parser, Debug)]
#[command(name = "run-artifacts")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// GitHub Actions workflow run ID
    run_id: String,
}

impl Cli {
    /// Parses the run identifier from `args`, whose first element is the
    /// program name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRunId`] with no positional argument and
    /// [`Error::TooManyArguments`] with more than one.
    pub fn from_args<I, T>(args: I) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| match e.kind() {
            ErrorKind::MissingRequiredArgument => Error::MissingRunId,
            ErrorKind::UnknownArgument | ErrorKind::TooManyValues => Error::TooManyArguments,
            _ => Error::InvalidArguments(e.to_string()),
        })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Downloads every artifact of the run into `config.output_dir`.
    ///
    /// Prints a summary of the written archives to stderr on success.
    pub async fn execute(&self, token: Token, config: Config) -> Result<()> {
        info!("Downloading artifacts for run {}", self.run_id);

        let client = GitHubClient::new(&config, token)?;
        let downloader = ArtifactDownloader::new(client, config.output_dir);

        let progress = DownloadProgress::start_listing(&self.run_id);
        let report = match downloader.download_all(&self.run_id, &progress).await {
            Ok(report) => report,
            Err(e) => {
                progress.abandon(&self.run_id);
                return Err(e)
                    .with_context(|| format!("Failed to download artifacts for run {}", self.run_id));
            }
        };
        progress.finish(&report);

        output::print_summary(&report);
        info!(
            "Wrote {} artifacts to {}",
            report.total(),
            downloader.output_dir().display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_single_run_id() {
        let cli = Cli::from_args(["run-artifacts", "12345"]).unwrap();
        assert_eq!(cli.run_id(), "12345");
    }

    #[test]
    fn test_run_id_is_not_validated() {
        let cli = Cli::from_args(["run-artifacts", "not-a-number"]).unwrap();
        assert_eq!(cli.run_id(), "not-a-number");
    }

    #[test]
    fn test_missing_run_id() {
        let err = Cli::from_args(["run-artifacts"]).unwrap_err();
        assert!(matches!(err, Error::MissingRunId));
        assert!(err.to_string().contains("No run ID provided"));
    }

    #[test]
    fn test_too_many_run_ids() {
        let err = Cli::from_args(["run-artifacts", "1", "2"]).unwrap_err();
        assert!(matches!(err, Error::TooManyArguments));

        let err = Cli::from_args(["run-artifacts", "1", "2", "3"]).unwrap_err();
        assert!(matches!(err, Error::TooManyArguments));
    }

    #[test]
    fn test_flags_are_rejected() {
        assert!(Cli::from_args(["run-artifacts", "12345", "--help"]).is_err());
        assert!(Cli::from_args(["run-artifacts", "12345", "--version"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_writes_archives() {
        let mut server = Server::new_async().await;
        let dir = TempDir::new().unwrap();

        let body = format!(
            r#"{{"artifacts":[{{"name":"build-logs","archive_download_url":"{}/download/1"}}]}}"#,
            server.url()
        );
        let _listing = server
            .mock(
                "GET",
                Matcher::Regex(r"^/repos/krogertechnology/esperanto/actions/runs/12345/artifacts".to_string()),
            )
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        let _download = server
            .mock("GET", "/download/1")
            .with_status(200)
            .with_body([0x50_u8, 0x4B, 0x05, 0x06])
            .create_async()
            .await;

        let config = Config::default()
            .with_api_base_url(&server.url())
            .unwrap()
            .with_output_dir(dir.path());
        let cli = Cli::from_args(["run-artifacts", "12345"]).unwrap();

        cli.execute(Token::from("test-token"), config).await.unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("build-logs.zip")).unwrap(),
            vec![0x50, 0x4B, 0x05, 0x06]
        );
    }

    #[tokio::test]
    async fn test_execute_fails_on_listing_error() {
        let mut server = Server::new_async().await;
        let dir = TempDir::new().unwrap();

        let _listing = server
            .mock("GET", Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let config = Config::default()
            .with_api_base_url(&server.url())
            .unwrap()
            .with_output_dir(dir.path());
        let cli = Cli::from_args(["run-artifacts", "999"]).unwrap();

        let err = cli
            .execute(Token::from("bad-token"), config)
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("run 999"));
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ListArtifacts { .. })
        ));
    }
}
