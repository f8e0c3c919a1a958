//! Badge generation pipeline.
//!
//! [`BadgeWriter`] validates a [`BadgeRequest`], builds the service URL,
//! downloads the badge and stores it atomically:
//! - [`persist`] - temp-file-then-rename write sequence

mod persist;


use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result, ToExitCode};
use crate::fetcher::{ContentFetcher, HttpFetcher};
use crate::types::{BadgeRequest, Event, Stage};
use crate::url_builder::{ShieldsUrlBuilder, UrlBuilder};
use crate::utils::output_file_name;

/// Capacity of the event channel; one generation emits at most five events
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Generates badges and writes them to disk
///
/// The writer holds no per-badge state: each [`generate`](Self::generate) call
/// owns its request from validation to the final rename.
#[derive(Clone)]
pub struct BadgeWriter {
    config: Arc<Config>,
    url_builder: Arc<dyn UrlBuilder>,
    fetcher: Arc<dyn ContentFetcher>,
    event_tx: broadcast::Sender<Event>,
}

impl BadgeWriter {
    /// Create a writer for the shields.io service described by `config`
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let url_builder = Arc::new(ShieldsUrlBuilder::new(config.fetch.base_url.clone()));
        let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
        Ok(Self::with_components(config, url_builder, fetcher))
    }

    /// Create a writer with a custom URL builder and fetcher
    pub fn with_components(
        config: Config,
        url_builder: Arc<dyn UrlBuilder>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config: Arc::new(config),
            url_builder,
            fetcher,
            event_tx,
        }
    }

    /// Subscribe to generation events
    ///
    /// Each subscriber receives every event emitted after it subscribed.
    /// Events sent while nobody is subscribed are dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate one badge
    ///
    /// Returns the output path exactly as given in the request.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if label, status or path is empty
    /// - [`Error::Transport`] / [`Error::HttpStatus`] if the download fails;
    ///   nothing is written in that case
    /// - [`Error::Persistence`] if the output path names no file (checked
    ///   before downloading) or the badge cannot be stored
    pub async fn generate(&self, request: &BadgeRequest) -> Result<PathBuf> {
        if let Err(e) = request.validate(self.config.validation_mode) {
            warn!(error = %e, "rejected badge request");
            return Err(self.fail(Stage::Validate, e.into()));
        }

        let path = request.output_path();
        if let Err(e) = output_file_name(path) {
            warn!(?path, error = %e, "rejected output path");
            return Err(self.fail(Stage::Validate, e.into()));
        }

        let options = request.options().effective();
        info!(
            label = request.label(),
            status = request.status(),
            ?path,
            "generating badge"
        );
        self.emit(Event::Generating {
            label: request.label().to_string(),
            status: request.status().to_string(),
            path: path.to_path_buf(),
        });

        let url = self
            .url_builder
            .build(request.label(), request.status(), &options);
        debug!(url = %url, "built badge URL");
        self.emit(Event::Fetching { url: url.clone() });

        let content = match self.fetcher.fetch(&url).await {
            Ok(content) => content,
            Err(e) => {
                error!(url = %url, error = %e, "failed to download badge");
                return Err(self.fail(Stage::Fetch, e));
            }
        };
        self.emit(Event::Fetched {
            url,
            bytes: content.len(),
        });

        if let Err(e) = persist::write_atomic(path, &content, &self.config.persistence).await {
            error!(?path, error = %e, "failed to save badge");
            return Err(self.fail(Stage::Persist, e.into()));
        }

        info!(?path, bytes = content.len(), "badge saved successfully");
        self.emit(Event::Saved {
            path: path.to_path_buf(),
            bytes: content.len(),
        });

        Ok(path.to_path_buf())
    }

    fn emit(&self, event: Event) {
        // No subscribers is not an error
        self.event_tx.send(event).ok();
    }

    fn fail(&self, stage: Stage, error: Error) -> Error {
        self.emit(Event::Failed {
            stage,
            code: error.error_code().to_string(),
            message: error.to_string(),
        });
        error
    }
}

impl std::fmt::Debug for BadgeWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeWriter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
