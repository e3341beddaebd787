//! Per-file class prefix token.

use std::fmt;
use std::path::Path;

/// Sanitized file stem used as the class prefix.
///
/// Only `[A-Za-z0-9_-]` survives. Everything else is dropped, so
/// `My Icon (v2).svg` becomes `MyIconv2`. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Token(String);

impl Token {
    /// Derive the token from a path's final component, extension removed.
    ///
    /// Leading dots are never an extension (`.svg` and `..svg` keep their
    /// whole name as the stem), and bytes that are not valid UTF-8 are
    /// dropped along with the other disallowed characters.
    pub fn from_path(path: &Path) -> Self {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        Self::sanitize(stem(&name))
    }

    /// Keep only ASCII letters, digits, `_` and `-`.
    pub fn sanitize(name: &str) -> Self {
        Self(name.chars().filter(|c| is_token_char(*c)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The replacement for every `cls`: `{token}-cls`.
    pub fn prefixed(&self, class: &str) -> String {
        format!("{}-{class}", self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `name` without its last extension. Dots at the start of the name are
/// skipped before looking for one.
fn stem(name: &str) -> &str {
    let start = name.len() - name.trim_start_matches('.').len();
    match name[start..].rfind('.') {
        Some(dot) => &name[..start + dot],
        None => name,
    }
}

#[inline]
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
