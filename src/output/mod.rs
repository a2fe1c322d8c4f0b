mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::DownloadProgress;
pub use styling::failure;
pub use summary::print_summary;

use styling::{muted, title};

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        title("📦 run-artifacts"),
        muted(env!("CARGO_PKG_VERSION")),
        muted("GitHub Actions artifact downloader")
    );
}
