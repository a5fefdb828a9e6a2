use thiserror::Error;

/// Crate-wide error type.
///
/// `Fetch`/`BadResponse` come out of the market-data client, `Delivery` out of
/// the notifier. A source returning no candle at all is not an error; the
/// client reports that as `Ok(None)`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    BadResponse(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
