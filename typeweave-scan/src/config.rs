//! Scanner configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// What to scan and how to classify what is found.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use typeweave_scan::ScannerConfig;
///
/// let config: ScannerConfig =
///     serde_json::from_str(r#"{ "roots": ["plugins"], "freshness_ms": 2000 }"#).unwrap();
/// assert_eq!(config.freshness.as_secs(), 2);
/// assert_eq!(config.dependency_dir, "Dependencies");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Directories to scan. Duplicates are scanned once.
    pub roots: Vec<PathBuf>,
    /// How long a scan result is reused before the next query rescans.
    #[serde(rename = "freshness_ms", with = "millis")]
    pub freshness: Duration,
    /// A directory containing a file with this name is skipped together
    /// with everything below it.
    pub ignore_marker: String,
    /// Files below a directory with this name are found but not searched.
    pub dependency_dir: String,
    /// Directories with this name are not entered.
    pub skip_dir: String,
    /// Accepted file extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Files whose name contains this fragment are ignored. Empty disables.
    pub excluded_fragment: String,
}

impl ScannerConfig {
    /// Default configuration with no roots.
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            freshness: Duration::from_secs(8),
            ignore_marker: ".pluginignore".into(),
            dependency_dir: "Dependencies".into(),
            skip_dir: "obj".into(),
            extensions: vec!["dll".into(), "exe".into()],
            excluded_fragment: ".vshost.".into(),
        }
    }

    /// Add a search root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Set the freshness window.
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Set the ignore marker file name.
    pub fn with_ignore_marker(mut self, marker: impl Into<String>) -> Self {
        self.ignore_marker = marker.into();
        self
    }

    /// Set the dependency directory name.
    pub fn with_dependency_dir(mut self, name: impl Into<String>) -> Self {
        self.dependency_dir = name.into();
        self
    }

    /// Set the skipped directory name.
    pub fn with_skip_dir(mut self, name: impl Into<String>) -> Self {
        self.skip_dir = name.into();
        self
    }

    /// Replace the accepted extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excluded file name fragment.
    pub fn with_excluded_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.excluded_fragment = fragment.into();
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
