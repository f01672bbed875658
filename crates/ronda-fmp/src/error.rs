//! Error types for the FMP client.

use ronda_traits::RondaError;
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Statement assembly failed.
    #[error("Failed to assemble statements for {symbol}: {source}")]
    Assemble {
        /// Ticker symbol.
        symbol: String,
        /// Underlying table error.
        #[source]
        source: RondaError,
    },
}

impl From<FmpError> for RondaError {
    fn from(err: FmpError) -> Self {
        Self::DataFetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_data_fetch() {
        let err: RondaError = FmpError::SymbolNotFound("ZZZZ".to_string()).into();
        assert!(matches!(err, RondaError::DataFetch(_)));
        assert!(err.to_string().contains("Symbol not found: ZZZZ"));
    }

    #[test]
    fn test_rate_limit_message() {
        assert!(
            FmpError::RateLimitExceeded
                .to_string()
                .starts_with("Rate limit exceeded")
        );
    }
}
