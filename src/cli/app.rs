use std::path::PathBuf;
use std::time::Duration;

use badge_dl::{
    BadgeRequest, BadgeWriter, Config, Error, OptionKey, OptionSet, Result, ValidationError,
    ValidationMode,
};
use tracing::debug;

use super::args::Args;
use super::output::OutputHandler;

/// Styles accepted by the badge service
const STYLES: [&str; 5] = ["flat", "flat-square", "plastic", "for-the-badge", "social"];

pub struct App {
    args: Args,
    output: OutputHandler,
}

impl App {
    pub fn new(args: Args) -> Self {
        let output = OutputHandler::new(args.verbose > 0);
        Self { args, output }
    }

    pub async fn run(&self) -> Result<PathBuf> {
        let config = self.config()?;
        debug!(?config, "resolved configuration");

        // Required inputs are reported before option problems
        let request = BadgeRequest::new(
            self.args.label.clone(),
            self.args.status.clone(),
            self.args.path.clone(),
            OptionSet::new(),
        );
        request.validate(config.validation_mode)?;
        let request = request.with_options(self.options()?);

        let path = BadgeWriter::new(config)?.generate(&request).await?;

        self.output.print_success(&path);
        Ok(path)
    }

    pub fn print_error(&self, error: &Error) {
        self.output.print_error(error);
    }

    /// Collect and check the badge options given on the command line
    fn options(&self) -> Result<OptionSet> {
        let given = [
            (OptionKey::Style, &self.args.style),
            (OptionKey::LabelColor, &self.args.label_color),
            (OptionKey::Color, &self.args.color),
            (OptionKey::Logo, &self.args.logo),
            (OptionKey::LogoColor, &self.args.logo_color),
            (OptionKey::CacheSeconds, &self.args.cache_seconds),
            (OptionKey::Link, &self.args.link),
            (OptionKey::MaxAge, &self.args.max_age),
        ];

        let mut options = OptionSet::new();
        for (key, value) in given {
            // Empty values fall back to defaults
            let Some(value) = value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            check_option(key, value)?;
            options.set(key, value);
        }
        Ok(options)
    }

    /// Config file, then flag and environment overrides
    fn config(&self) -> Result<Config> {
        let mut config = match &self.args.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(base_url) = &self.args.base_url {
            config.fetch.base_url = base_url.clone();
        }
        if let Some(secs) = self.args.timeout {
            config.fetch.timeout = Duration::from_secs(secs);
        }
        if self.args.all_missing {
            config.validation_mode = ValidationMode::AllMissing;
        }

        config.validate()?;
        Ok(config)
    }
}

fn check_option(key: OptionKey, value: &str) -> std::result::Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidOption {
        option: key.as_str().to_string(),
        reason,
    };

    match key {
        OptionKey::Style if !STYLES.contains(&value) => Err(invalid(format!(
            "'{}' is not one of {}",
            value,
            STYLES.join(", ")
        ))),
        OptionKey::CacheSeconds | OptionKey::MaxAge if value.parse::<u64>().is_err() => Err(
            invalid(format!("'{}' is not a whole number of seconds", value)),
        ),
        OptionKey::Link => match url::Url::parse(value) {
            Ok(url) if url.has_host() => Ok(()),
            _ => Err(invalid(format!("'{}' is not a valid URL", value))),
        },
        _ => Ok(()),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn app(extra: &[&str]) -> App {
        app_for(["build", "passing", "out/build.svg"], extra)
    }

    fn app_for(positional: [&str; 3], extra: &[&str]) -> App {
        let mut argv = vec!["badge-dl"];
        argv.extend_from_slice(&positional);
        argv.extend_from_slice(extra);
        App::new(Args::try_parse_from(argv).unwrap())
    }

    fn invalid_option(err: Error) -> String {
        match err {
            Error::Validation(ValidationError::InvalidOption { option, .. }) => option,
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn no_flags_gives_empty_option_set() {
        assert!(app(&[]).options().unwrap().is_empty());
    }

    #[test]
    fn flags_map_to_option_keys() {
        let options = app(&[
            "-c",
            "green",
            "-l",
            "333",
            "-s",
            "for-the-badge",
            "--logo",
            "rust",
            "--logo-color",
            "white",
            "--cache-seconds",
            "3600",
            "--link",
            "https://example.com",
            "--max-age",
            "60",
        ])
        .options()
        .unwrap();

        assert_eq!(options.len(), 8);
        assert_eq!(options.get(OptionKey::Color), Some("green"));
        assert_eq!(options.get(OptionKey::LabelColor), Some("333"));
        assert_eq!(options.get(OptionKey::Style), Some("for-the-badge"));
        assert_eq!(options.get(OptionKey::Link), Some("https://example.com"));
        assert_eq!(options.get(OptionKey::MaxAge), Some("60"));
    }

    #[test]
    fn empty_flag_values_are_skipped() {
        let options = app(&["--style", "", "--max-age", ""]).options().unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = app(&["--style", "rounded"]).options().unwrap_err();
        assert_eq!(invalid_option(err), "style");
    }

    #[tokio::test]
    async fn missing_label_is_reported_before_invalid_style() {
        let err = app_for(["", "passing", "out/build.svg"], &["--style", "rounded"])
            .run()
            .await
            .unwrap_err();

        assert!(
            matches!(
                err,
                Error::Validation(ValidationError::MissingField { ref field }) if field == "label"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn every_known_style_is_accepted() {
        for style in STYLES {
            assert!(app(&["--style", style]).options().is_ok(), "{style}");
        }
    }

    #[test]
    fn non_numeric_durations_are_rejected() {
        let err = app(&["--cache-seconds", "soon"]).options().unwrap_err();
        assert_eq!(invalid_option(err), "cache-seconds");

        let err = app(&["--max-age=-5"]).options().unwrap_err();
        assert_eq!(invalid_option(err), "max-age");
    }

    #[test]
    fn link_must_be_an_absolute_url() {
        let err = app(&["--link", "not a url"]).options().unwrap_err();
        assert_eq!(invalid_option(err), "link");

        let err = app(&["--link", "mailto:someone@example.com"])
            .options()
            .unwrap_err();
        assert_eq!(invalid_option(err), "link");
    }

    #[test]
    fn flags_override_default_config() {
        let config = app(&[
            "--base-url",
            "http://localhost:8080/badge",
            "--timeout",
            "5",
            "--all-missing",
        ])
        .config()
        .unwrap();

        assert_eq!(config.fetch.base_url, "http://localhost:8080/badge");
        assert_eq!(config.fetch.timeout, Duration::from_secs(5));
        assert_eq!(config.validation_mode, ValidationMode::AllMissing);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("badge-dl.json");
        std::fs::write(
            &file,
            r#"{"fetch": {"base_url": "https://badges.example.com/badge", "timeout": 10}}"#,
        )
        .unwrap();

        let config = app(&["--config", file.to_str().unwrap(), "--timeout", "2"])
            .config()
            .unwrap();

        assert_eq!(config.fetch.base_url, "https://badges.example.com/badge");
        assert_eq!(config.fetch.timeout, Duration::from_secs(2));
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        let err = app(&["--timeout", "0"]).config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
