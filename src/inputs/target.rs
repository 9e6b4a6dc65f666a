use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::{AppResult, ValidationError};

use super::lines::load_lines;

const VIDEO_PATH_MARKER: &str = "/video/";

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Video,
    Profile,
}

impl TargetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetKind::Video => "video",
            TargetKind::Profile => "profile",
        }
    }

    fn classify(url: &Url) -> Self {
        if url.path().contains(VIDEO_PATH_MARKER) {
            TargetKind::Video
        } else {
            TargetKind::Profile
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated target URL and the kind derived from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    kind: TargetKind,
}

impl Target {
    /// Parses and classifies a target. Input without a scheme is treated as
    /// `https://`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, unparsable URLs, non-HTTP schemes,
    /// or URLs without a host.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::TargetEmpty);
        }
        let candidate = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{}", raw)
        };
        let url = Url::parse(&candidate).map_err(|err| ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ValidationError::UnsupportedScheme {
                    url: raw.to_owned(),
                    scheme: scheme.to_owned(),
                });
            }
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ValidationError::UrlMissingHost {
                url: raw.to_owned(),
            });
        }
        let kind = TargetKind::classify(&url);
        Ok(Self { url, kind })
    }

    /// Parses a target and checks it against an explicitly requested kind.
    ///
    /// # Errors
    ///
    /// Returns an error when parsing fails or the URL shape contradicts
    /// `expected`.
    pub fn parse_as(raw: &str, expected: TargetKind) -> Result<Self, ValidationError> {
        let target = Self::parse(raw)?;
        if target.kind != expected {
            return Err(ValidationError::KindMismatch {
                url: raw.trim().to_owned(),
                expected,
            });
        }
        Ok(target)
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        self.kind
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Loads targets from a line file. Invalid entries are skipped with a
/// warning so one typo does not sink a whole batch.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read.
pub fn load_targets(path: &Path) -> AppResult<Vec<Target>> {
    let targets = load_lines(path)?
        .into_iter()
        .filter_map(|line| match Target::parse(&line) {
            Ok(target) => Some(target),
            Err(err) => {
                warn!("Skipping target in '{}': {}", path.display(), err);
                None
            }
        })
        .collect();
    Ok(targets)
}
