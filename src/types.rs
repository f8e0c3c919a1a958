//! Core types for badge-dl

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::ValidationMode;
use crate::error::ValidationError;

/// Styling option accepted by the badge service
///
/// Variants are declared in canonical order; query strings list options in
/// this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKey {
    /// Badge style (default: "flat")
    Style,
    /// Background color of the label half (default: "555")
    LabelColor,
    /// Background color of the status half (default: "blue")
    Color,
    /// simple-icons logo slug
    Logo,
    /// Logo color
    LogoColor,
    /// HTTP cache lifetime hint
    CacheSeconds,
    /// Link target
    Link,
    /// Max-age hint
    MaxAge,
}

impl OptionKey {
    /// Every option, in canonical order
    pub const ALL: [OptionKey; 8] = [
        OptionKey::Style,
        OptionKey::LabelColor,
        OptionKey::Color,
        OptionKey::Logo,
        OptionKey::LogoColor,
        OptionKey::CacheSeconds,
        OptionKey::Link,
        OptionKey::MaxAge,
    ];

    /// Input name of the option (e.g. "label-color")
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::Style => "style",
            OptionKey::LabelColor => "label-color",
            OptionKey::Color => "color",
            OptionKey::Logo => "logo",
            OptionKey::LogoColor => "logo-color",
            OptionKey::CacheSeconds => "cache-seconds",
            OptionKey::Link => "link",
            OptionKey::MaxAge => "max-age",
        }
    }

    /// Query parameter name understood by shields.io
    pub fn query_name(&self) -> &'static str {
        match self {
            OptionKey::LabelColor => "labelColor",
            OptionKey::CacheSeconds => "cacheSeconds",
            OptionKey::MaxAge => "maxAge",
            OptionKey::LogoColor => "logoColor",
            other => other.as_str(),
        }
    }

    /// Value applied when the option is not supplied
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            OptionKey::Style => Some("flat"),
            OptionKey::LabelColor => Some("555"),
            OptionKey::Color => Some("blue"),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling options for a badge
///
/// An `OptionSet` built by callers holds only what was supplied; the
/// effective set used for URL building comes from [`OptionSet::effective`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<OptionKey, String>);

impl OptionSet {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value
    pub fn set(&mut self, key: OptionKey, value: impl Into<String>) -> &mut Self {
        self.0.insert(key, value.into());
        self
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, key: OptionKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get an option value
    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Status color, falling back to the default
    pub fn color(&self) -> &str {
        self.get(OptionKey::Color)
            .filter(|c| !c.is_empty())
            .or(OptionKey::Color.default_value())
            .unwrap_or_default()
    }

    /// Iterate over options in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of options present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no option is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge supplied options over defaults
    ///
    /// Options with a default are always present in the result. Options
    /// without one appear only when supplied with a non-empty value; an empty
    /// value counts as not supplied.
    pub fn effective(&self) -> OptionSet {
        let mut merged = BTreeMap::new();
        for key in OptionKey::ALL {
            match self.get(key).filter(|v| !v.is_empty()) {
                Some(value) => {
                    merged.insert(key, value.to_string());
                }
                None => {
                    if let Some(default) = key.default_value() {
                        merged.insert(key, default.to_string());
                    }
                }
            }
        }
        OptionSet(merged)
    }
}

/// One badge to generate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeRequest {
    label: String,
    status: String,
    output_path: PathBuf,
    options: OptionSet,
}

impl BadgeRequest {
    /// Create a request; fields are checked by [`validate`](Self::validate)
    pub fn new(
        label: impl Into<String>,
        status: impl Into<String>,
        output_path: impl Into<PathBuf>,
        options: OptionSet,
    ) -> Self {
        Self {
            label: label.into(),
            status: status.into(),
            output_path: output_path.into(),
            options,
        }
    }

    /// Replace the options of this request
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    /// Left-hand text
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Right-hand text
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Where the badge is written
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Options as supplied (defaults not applied)
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Check that label, status and path are present
    ///
    /// Fields are evaluated in the order label, status, path.
    pub fn validate(&self, mode: ValidationMode) -> Result<(), ValidationError> {
        let missing: Vec<String> = [
            ("label", self.label.is_empty()),
            ("status", self.status.is_empty()),
            ("path", self.output_path.as_os_str().is_empty()),
        ]
        .into_iter()
        .filter(|(_, empty)| *empty)
        .map(|(name, _)| name.to_string())
        .collect();

        match (mode, missing.len()) {
            (_, 0) => Ok(()),
            (ValidationMode::AllMissing, n) if n > 1 => {
                Err(ValidationError::MissingFields { fields: missing })
            }
            _ => Err(ValidationError::MissingField {
                field: missing.into_iter().next().unwrap_or_default(),
            }),
        }
    }
}

/// Stage of a badge generation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Input validation
    Validate,
    /// HTTP download
    Fetch,
    /// Atomic write to disk
    Persist,
}

/// Event emitted during badge generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Inputs validated, generation starting
    Generating {
        /// Badge label
        label: String,
        /// Badge status
        status: String,
        /// Output path as supplied
        path: PathBuf,
    },

    /// About to request the badge
    Fetching {
        /// Request URL
        url: String,
    },

    /// Badge content downloaded
    Fetched {
        /// Request URL
        url: String,
        /// Size of the response body
        bytes: usize,
    },

    /// Badge written to its final path
    Saved {
        /// Output path as supplied
        path: PathBuf,
        /// Bytes written
        bytes: usize,
    },

    /// Generation failed
    Failed {
        /// Stage at which generation stopped
        stage: Stage,
        /// Machine-readable error code
        code: String,
        /// Error message
        message: String,
    },
}
