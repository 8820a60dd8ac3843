//! Configuration-selected data source.

use altz_fmp::FmpClient;
use altz_traits::{AnnualStatements, ComputationFailure, FinancialDataSource, Result};
use altz_yahoo::YahooClient;

use crate::config::{Config, ProviderKind};

/// One of the supported provider adapters.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Yahoo Finance.
    Yahoo(YahooClient),
    /// Financial Modeling Prep.
    Fmp(FmpClient),
}

impl DataSource {
    /// Build the adapter selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::Config`] if FMP is selected without an API
    /// key, or a fetch error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.provider {
            ProviderKind::Yahoo => Ok(Self::Yahoo(
                YahooClient::new()?.with_timeout(config.timeout)?,
            )),
            ProviderKind::Fmp => {
                let api_key = config.fmp_api_key.as_deref().ok_or_else(|| {
                    ComputationFailure::Config(format!(
                        "{} is required for the fmp provider",
                        crate::config::FMP_API_KEY_VAR
                    ))
                })?;
                Ok(Self::Fmp(FmpClient::new(api_key).with_timeout(config.timeout)?))
            }
        }
    }

    /// Which provider this adapter talks to.
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::Yahoo(_) => ProviderKind::Yahoo,
            Self::Fmp(_) => ProviderKind::Fmp,
        }
    }
}

impl From<YahooClient> for DataSource {
    fn from(client: YahooClient) -> Self {
        Self::Yahoo(client)
    }
}

impl From<FmpClient> for DataSource {
    fn from(client: FmpClient) -> Self {
        Self::Fmp(client)
    }
}

impl FinancialDataSource for DataSource {
    fn name(&self) -> &str {
        match self {
            Self::Yahoo(c) => c.name(),
            Self::Fmp(c) => c.name(),
        }
    }

    async fn annual_statements(&self, symbol: &str) -> Result<AnnualStatements> {
        match self {
            Self::Yahoo(c) => c.annual_statements(symbol).await,
            Self::Fmp(c) => c.annual_statements(symbol).await,
        }
    }

    async fn market_capitalization(&self, symbol: &str) -> Result<f64> {
        match self {
            Self::Yahoo(c) => c.market_capitalization(symbol).await,
            Self::Fmp(c) => c.market_capitalization(symbol).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yahoo_from_config() {
        let source = DataSource::from_config(&Config::default()).unwrap();
        assert_eq!(source.kind(), ProviderKind::Yahoo);
        assert_eq!(source.name(), "yahoo");
    }

    #[test]
    fn test_fmp_from_config() {
        let config = Config {
            fmp_api_key: Some("secret".to_string()),
            ..Config::for_provider(ProviderKind::Fmp)
        };
        let source = DataSource::from_config(&config).unwrap();
        assert_eq!(source.kind(), ProviderKind::Fmp);
        assert_eq!(source.name(), "fmp");
    }

    #[test]
    fn test_fmp_requires_api_key() {
        let err = DataSource::from_config(&Config::for_provider(ProviderKind::Fmp)).unwrap_err();
        assert!(matches!(err, ComputationFailure::Config(_)));
    }

    #[test]
    fn test_from_client() {
        assert_eq!(
            DataSource::from(FmpClient::new("k")).kind(),
            ProviderKind::Fmp
        );
        assert_eq!(
            DataSource::from(YahooClient::new().unwrap()).kind(),
            ProviderKind::Yahoo
        );
    }
}
