//! Exchange client errors

use thiserror::Error;

/// Errors returned by [`Exchanger`](super::Exchanger) operations
///
/// The `Display` strings are matched by callers, so `MissingPair`,
/// `NonOkStatus` and `EmptyOrderBook` keep their exact wording.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// A pair list was empty where at least one pair is needed
    #[error("at least one pair is required")]
    MissingPair,
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request failed before a response was obtained
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// Non-200 status on order book, trades, currencies and candle history
    #[error("server returned status {0}")]
    Status(u16),
    /// Non-200 status on ticker and close price
    #[error("server returned non-200 status ({0})")]
    NonOkStatus(u16),
    /// The body was not valid JSON of the expected shape
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    /// The order book response decoded to an empty map
    #[error("empty order book response")]
    EmptyOrderBook,
}

impl ExchangeError {
    /// HTTP status code carried by a status error
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Status(code) | ExchangeError::NonOkStatus(code) => Some(*code),
            _ => None,
        }
    }
}
