//! Badge URL construction
//!
//! shields.io static badges are addressed as
//! `{base}/{label}-{status}-{color}?{options}`. Dashes separate the three
//! path parts, so literal dashes and underscores in the text are doubled,
//! and everything else outside a small safe set is percent-encoded.

use crate::config::DEFAULT_BASE_URL;
use crate::types::{OptionKey, OptionSet};

/// Builds the request URL for a badge
///
/// Implementations must be pure: identical inputs give identical URLs and no
/// I/O happens.
pub trait UrlBuilder: Send + Sync {
    /// Build the URL for `label`/`status` using the effective `options`
    fn build(&self, label: &str, status: &str, options: &OptionSet) -> String;
}

/// URL builder for the shields.io static badge endpoint
#[derive(Clone, Debug)]
pub struct ShieldsUrlBuilder {
    base_url: String,
}

impl ShieldsUrlBuilder {
    /// Create a builder for a custom endpoint (e.g. a self-hosted shields instance)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ShieldsUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UrlBuilder for ShieldsUrlBuilder {
    fn build(&self, label: &str, status: &str, options: &OptionSet) -> String {
        let mut url = format!(
            "{}/{}-{}-{}",
            self.base_url,
            encode_path_part(label),
            encode_path_part(status),
            options.color()
        );

        let query = build_query(options);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        url
    }
}

/// Encode label or status text for the badge path
///
/// Spaces stay literal, `_` and `-` are doubled, ASCII alphanumerics and
/// `.` and `~` pass through, everything else is percent-encoded as UTF-8.
pub fn encode_path_part(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        match c {
            ' ' => encoded.push(' '),
            '_' => encoded.push_str("__"),
            '-' => encoded.push_str("--"),
            c => encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf))),
        }
    }
    encoded
}

/// Form-encoded query string of every non-empty option except `color`
fn build_query(options: &OptionSet) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in options.iter() {
        if key == OptionKey::Color || value.is_empty() {
            continue;
        }
        serializer.append_pair(key.query_name(), value);
    }
    serializer.finish()
}
