//! Configuration for selecting and building a data source.
//!
//! Values come from the environment, optionally seeded from a `.env` file:
//!
//! | variable            | meaning                              | default |
//! |---------------------|--------------------------------------|---------|
//! | `ALTZ_PROVIDER`     | `yahoo` or `fmp`                     | `yahoo` |
//! | `FMP_API_KEY`       | API key, required for `fmp`          |         |
//! | `ALTZ_TIMEOUT_SECS` | HTTP request timeout in seconds      | `30`    |

use std::{env, fmt, str::FromStr, time::Duration};

use altz_traits::{ComputationFailure, Result};
use serde::{Deserialize, Serialize};

/// Environment variable selecting the provider.
pub const PROVIDER_VAR: &str = "ALTZ_PROVIDER";
/// Environment variable holding the FMP API key.
pub const FMP_API_KEY_VAR: &str = "FMP_API_KEY";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "ALTZ_TIMEOUT_SECS";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported market-data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Yahoo Finance.
    #[default]
    Yahoo,
    /// Financial Modeling Prep.
    Fmp,
}

impl ProviderKind {
    /// All providers.
    pub const ALL: [Self; 2] = [Self::Yahoo, Self::Fmp];

    /// Lowercase provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Fmp => "fmp",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ComputationFailure;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "fmp" => Ok(Self::Fmp),
            other => Err(ComputationFailure::Config(format!(
                "unknown provider '{other}', expected one of: yahoo, fmp"
            ))),
        }
    }
}

/// Data source configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Provider to fetch from.
    pub provider: ProviderKind,
    /// FMP API key.
    pub fmp_api_key: Option<String>,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            fmp_api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Configuration for the given provider with default settings.
    #[must_use]
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::Config`] for an unknown provider or an
    /// unparsable or zero timeout.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::Config`] for an unknown provider or an
    /// unparsable or zero timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = lookup(PROVIDER_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        let fmp_api_key = lookup(FMP_API_KEY_VAR).filter(|v| !v.trim().is_empty());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| {
                    ComputationFailure::Config(format!(
                        "{TIMEOUT_VAR} must be whole seconds, got '{v}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(ComputationFailure::Config(format!(
                        "{TIMEOUT_VAR} must be at least 1 second"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            provider,
            fmp_api_key,
            timeout,
        })
    }
}
