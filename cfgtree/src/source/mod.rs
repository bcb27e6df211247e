//! Adapters turning configuration sources into plain mappings.
//!
//! Second-order sources are named by prefixed tokens:
//!
//! - `json:<text>` carries inline JSON;
//! - `file:<path>` or `file://<path>` names a JSON file.
//!
//! Tokens with any other prefix are recognised as [`SourceToken::Unrecognised`]
//! and skipped by the store.

mod cmdline;
mod json;

use std::path::Path;

pub use cmdline::{CmdLineParams, CommandLineAdapter};
pub use json::{load_json_file, parse_json_text};
pub(crate) use json::read_json_file;

/// Prefix introducing inline JSON text.
pub const JSON_PREFIX: &str = "json:";
/// Prefix introducing a JSON file path.
pub const FILE_PREFIX: &str = "file:";
/// URL-style prefix introducing a JSON file path.
pub const FILE_URL_PREFIX: &str = "file://";

/// Classified view of a source token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceToken<'a> {
    /// Inline JSON text with the prefix removed.
    Json(&'a str),
    /// JSON file path with the prefix removed.
    File(&'a Path),
    /// Token whose prefix is not understood.
    Unrecognised(&'a str),
}

impl<'a> SourceToken<'a> {
    /// Classify `token` by its prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::source::SourceToken;
    /// use std::path::Path;
    ///
    /// assert_eq!(SourceToken::parse("json:{}"), SourceToken::Json("{}"));
    /// assert_eq!(
    ///     SourceToken::parse("file:///etc/app.json"),
    ///     SourceToken::File(Path::new("/etc/app.json")),
    /// );
    /// assert_eq!(SourceToken::parse("http://x"), SourceToken::Unrecognised("http://x"));
    /// ```
    #[must_use]
    pub fn parse(token: &'a str) -> Self {
        if let Some(text) = token.strip_prefix(JSON_PREFIX) {
            Self::Json(text)
        } else if let Some(path) = strip_file_prefix(token) {
            Self::File(Path::new(path))
        } else {
            Self::Unrecognised(token)
        }
    }
}

/// Remove `file://` or `file:` from the front of `token`.
pub(crate) fn strip_file_prefix(token: &str) -> Option<&str> {
    token
        .strip_prefix(FILE_URL_PREFIX)
        .or_else(|| token.strip_prefix(FILE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("json:{\"a\":1}", SourceToken::Json("{\"a\":1}"))]
    #[case("json:", SourceToken::Json(""))]
    #[case("file:cfg.json", SourceToken::File(Path::new("cfg.json")))]
    #[case("file:///abs/cfg.json", SourceToken::File(Path::new("/abs/cfg.json")))]
    #[case("file://rel/cfg.json", SourceToken::File(Path::new("rel/cfg.json")))]
    #[case("cfg.json", SourceToken::Unrecognised("cfg.json"))]
    #[case("JSON:{}", SourceToken::Unrecognised("JSON:{}"))]
    fn classifies_by_prefix(#[case] token: &str, #[case] expected: SourceToken<'_>) {
        assert_eq!(SourceToken::parse(token), expected);
    }
}
