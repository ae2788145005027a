//! Connection descriptors (`scheme://location`) for mountable storage.

use std::fmt;
use std::str::FromStr;

use crate::error::DsnError;

/// A parsed connection descriptor, e.g. `file:///tmp` or
/// `git+http://github.com`.
///
/// The scheme is normalised to lowercase; the location is kept verbatim.
/// Hashable and comparable so it can key the mount cache in
/// [`FilesystemFactory`](crate::filesystem::FilesystemFactory).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dsn {
    scheme: String,
    path: String,
}

impl Dsn {
    /// Parse `input` into a [`Dsn`].
    ///
    /// Schemes are ASCII alphanumerics plus `+`, `-` and `.` (so compound
    /// schemes like `git+http` parse).
    pub fn parse(input: &str) -> Result<Self, DsnError> {
        let (scheme, path) = input
            .split_once("://")
            .ok_or_else(|| DsnError::MissingSeparator { input: input.to_owned() })?;
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(DsnError::MalformedScheme { input: input.to_owned() });
        }
        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            path: path.to_owned(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for Dsn {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parse_local_file_dsn() {
        let dsn = Dsn::parse("file:///tmp").expect("parse");
        assert_eq!(dsn.scheme(), "file");
        assert_eq!(dsn.path(), "/tmp");
    }

    #[rstest]
    #[case("git+http://github.com", "git+http", "github.com")]
    #[case("FILE:///docs", "file", "/docs")]
    #[case("s3://bucket/templates", "s3", "bucket/templates")]
    fn parse_schemes(#[case] input: &str, #[case] scheme: &str, #[case] path: &str) {
        let dsn = Dsn::parse(input).expect("parse");
        assert_eq!(dsn.scheme(), scheme);
        assert_eq!(dsn.path(), path);
    }

    #[test]
    fn display_roundtrips() {
        let dsn = Dsn::parse("file:///tmp").expect("parse");
        assert_eq!(dsn.to_string(), "file:///tmp");
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let dsn: Dsn = "file:///srv/docs".parse().expect("parse");
        assert_eq!(dsn.path(), "/srv/docs");
    }

    #[test]
    fn missing_separator_is_rejected() {
        let err = Dsn::parse("/just/a/path").unwrap_err();
        assert!(matches!(err, DsnError::MissingSeparator { .. }), "got: {err}");
        assert!(err.to_string().contains("/just/a/path"));
    }

    #[test]
    fn empty_scheme_is_rejected() {
        let err = Dsn::parse("://tmp").unwrap_err();
        assert!(matches!(err, DsnError::MalformedScheme { .. }), "got: {err}");
    }

    #[test]
    fn scheme_with_invalid_characters_is_rejected() {
        let err = Dsn::parse("bad scheme://x").unwrap_err();
        assert!(matches!(err, DsnError::MalformedScheme { .. }), "got: {err}");
    }
}
