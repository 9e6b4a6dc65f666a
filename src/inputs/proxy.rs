use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::error::{AppResult, ValidationError};

use super::lines::load_lines;

const PROXY_SCHEMES: [&str; 4] = ["http://", "https://", "socks5://", "socks5h://"];

/// Opaque proxy address. Cheap to clone; read-only during a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyDescriptor(Arc<str>);

impl ProxyDescriptor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ProxyDescriptor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let lower = value.to_ascii_lowercase();
        let known = PROXY_SCHEMES
            .iter()
            .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len());
        if known {
            Ok(Self(Arc::from(value)))
        } else {
            Err(ValidationError::UnsupportedProxyScheme {
                value: value.to_owned(),
            })
        }
    }
}

impl fmt::Display for ProxyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loads proxies from a line file, skipping entries without a known scheme.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read.
pub fn load_proxies(path: &Path) -> AppResult<Vec<ProxyDescriptor>> {
    Ok(parse_proxies(load_lines(path)?))
}

#[must_use]
pub fn parse_proxies<I>(entries: I) -> Vec<ProxyDescriptor>
where
    I: IntoIterator<Item = String>,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry.parse::<ProxyDescriptor>() {
            Ok(proxy) => Some(proxy),
            Err(err) => {
                warn!("Skipping proxy: {}", err);
                None
            }
        })
        .collect()
}
