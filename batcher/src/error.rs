use thiserror::Error;

use crate::RequestId;

#[derive(Debug, Error)]
pub enum BatcherError {
    /// An encoding result arrived for work the store never dispatched.
    #[error("no such key ({0}) in requested set")]
    NoSuchRequest(RequestId),

    #[error("no such key ({0}) in encoded set")]
    ResultNotFound(RequestId),

    #[error("types error: {0}")]
    Types(#[from] disperser_types::TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("metrics error: {0}")]
    Metrics(String),
}
