//! Finalized recording artifact

use std::fmt;

use serde::{Deserialize, Serialize};

/// A finished recording: a local file reference plus its duration and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub uri: String,
    pub duration_seconds: u64,
    pub size_bytes: u64,
}

impl Artifact {
    pub fn new(uri: impl Into<String>, duration_seconds: u64, size_bytes: u64) -> Self {
        Self {
            uri: uri.into(),
            duration_seconds,
            size_bytes,
        }
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes;
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.uri,
            format_elapsed(self.duration_seconds),
            self.human_readable_size()
        )
    }
}

/// Format elapsed seconds as `m:ss` for the recording timer
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(7), "0:07");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(Artifact::new("a.wav", 1, 500).human_readable_size(), "500 B");
        assert_eq!(Artifact::new("a.wav", 1, 2048).human_readable_size(), "2.0 KB");
        assert_eq!(
            Artifact::new("a.wav", 1, 3 * 1024 * 1024).human_readable_size(),
            "3.0 MB"
        );
    }

    #[test]
    fn display_includes_uri_and_duration() {
        let artifact = Artifact::new("/tmp/dream.wav", 3, 100_000);
        let shown = artifact.to_string();
        assert!(shown.contains("/tmp/dream.wav"));
        assert!(shown.contains("0:03"));
        assert!(shown.contains("97.7 KB"));
    }
}
