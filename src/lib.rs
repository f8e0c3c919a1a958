//! # badge-dl
//!
//! Download status badges from shields.io and store them on disk atomically.
//!
//! ## Design Philosophy
//!
//! badge-dl is designed to be:
//! - **Deterministic** - The same label, status and options always give the same URL
//! - **Crash-safe** - Badges are written to a temporary file and renamed into place
//! - **Fail-fast** - One HTTP attempt, no retries, classified errors
//! - **CI-friendly** - Distinct exit codes per failure kind in the `badge-dl` binary
//!
//! ## Quick Start
//!
//! ```no_run
//! use badge_dl::{BadgeRequest, BadgeWriter, Config, OptionKey, OptionSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let writer = BadgeWriter::new(Config::default())?;
//!
//!     let options = OptionSet::new()
//!         .with(OptionKey::Color, "brightgreen")
//!         .with(OptionKey::Logo, "rust");
//!     let request = BadgeRequest::new("coverage", "95%", "badges/coverage.svg", options);
//!
//!     let path = writer.generate(&request).await?;
//!     println!("Badge written to {}", path.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP download of badge content
pub mod fetcher;
/// Core types and events
pub mod types;
/// Badge URL construction
pub mod url_builder;
/// Utility functions
pub mod utils;
/// Badge generation pipeline
pub mod writer;

// Re-export commonly used types
pub use config::{Config, FetchConfig, PersistenceConfig, ValidationMode};
pub use error::{Error, PersistenceError, Result, ToExitCode, ValidationError};
pub use fetcher::{ContentFetcher, HttpFetcher};
pub use types::{BadgeRequest, Event, OptionKey, OptionSet, Stage};
pub use url_builder::{ShieldsUrlBuilder, UrlBuilder};
pub use writer::BadgeWriter;

/// Generate a single badge with a writer built from `config`.
///
/// Convenience wrapper for one-shot callers that do not need events.
///
/// # Example
///
/// ```no_run
/// use badge_dl::{BadgeRequest, Config, OptionSet, generate_badge};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let request = BadgeRequest::new("build", "passing", "build.svg", OptionSet::new());
///     generate_badge(Config::default(), &request).await?;
///     Ok(())
/// }
/// ```
pub async fn generate_badge(
    config: Config,
    request: &BadgeRequest,
) -> Result<std::path::PathBuf> {
    BadgeWriter::new(config)?.generate(request).await
}
