//! Error types for the ronda toolkit.
//!
//! Every engine in the workspace reports failures through [`RondaError`].
//! Missing line items are never errors: they read as zero and computation
//! proceeds. Only the conditions listed here stop a valuation.

use thiserror::Error;

/// The main error type for ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// The cash-flow statement has no periods, so no free cash flow history exists.
    #[error("Unable to calculate historical free cash flow")]
    NoFreeCashFlowHistory,

    /// The discount rate does not exceed the terminal growth rate.
    #[error(
        "Invalid terminal value: discount rate {discount_rate} must exceed terminal growth {terminal_growth}"
    )]
    InvalidTerminalValue {
        /// Discount rate used for the valuation.
        discount_rate: f64,
        /// Terminal growth rate used for the valuation.
        terminal_growth: f64,
    },

    /// An assumption is outside its allowed range.
    #[error("Invalid assumption: {0}")]
    InvalidAssumption(String),

    /// A statement needed for the computation has no readable latest period.
    #[error("Missing statement: {0}")]
    MissingStatement(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error reading a snapshot from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding a snapshot.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RondaError {
    /// Whether this error stems from the input data rather than the assumptions.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::NoFreeCashFlowHistory
                | Self::MissingStatement(_)
                | Self::InvalidData(_)
                | Self::DataFetch(_)
        )
    }
}

/// A specialized Result type for ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;
