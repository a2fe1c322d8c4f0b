use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{failure, pending, success};
use crate::download::RunReport;

/// Progress tracking for a run: a spinner while listing, then a bar counting
/// finished artifacts.
///
/// Clones share one bar, so each download task can tick it.
#[derive(Clone)]
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    pub fn start_listing(run_id: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {msg} {spinner}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(pending(format!("Listing artifacts for run {run_id}")).to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// A tracker that draws nothing.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn start_downloads(&self, total: usize) {
        self.pb.set_style(
            ProgressStyle::default_bar()
                .template("  {msg} [{bar:30.green/dim}] {pos}/{len} {spinner}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        self.pb.set_length(total as u64);
        self.pb.set_position(0);
        self.pb.set_message(pending("Downloading artifacts").to_string());
    }

    pub fn artifact_finished(&self, name: &str) {
        self.pb.inc(1);
        self.pb
            .set_message(pending(format!("Downloaded {name}")).to_string());
    }

    pub fn finish(&self, report: &RunReport) {
        self.pb.finish_with_message(
            success(format!("Downloaded {} artifacts", report.total())).to_string(),
        );
    }

    /// Leaves the bar where it stopped when the run fails.
    pub fn abandon(&self, run_id: &str) {
        self.pb
            .abandon_with_message(failure(format!("Run {run_id} failed")).to_string());
    }
}
