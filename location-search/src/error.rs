//! Errors surfaced by the search and forecast capabilities

use thiserror::Error;

/// Failure of a [`WeatherClient`](crate::client::WeatherClient) call.
///
/// Cloneable and comparable so it can travel inside actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The response decoded but its contents are inconsistent
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The call was abandoned before it produced a result
    #[error("request canceled")]
    Canceled,
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Network(error.to_string())
        }
    }
}
