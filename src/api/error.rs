use chrono::NaiveDate;
use reqwest::StatusCode;

use crate::core::day::DayError;

/// Reasons for a day's prices to be unavailable.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to call the price API")]
    Network(#[source] reqwest::Error),

    #[error("the price API responded with {status}")]
    Upstream { status: StatusCode },

    #[error("malformed price payload")]
    Parse(#[from] ParseError),

    #[error("prices for {on} are not published yet")]
    NotYetPublished { on: NaiveDate },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to deserialize the response")]
    Json(#[from] serde_json::Error),

    #[error("the response is not a full day")]
    Day(#[from] DayError),
}

impl FetchError {
    /// Expected absence rather than a failure.
    #[must_use]
    pub const fn is_not_yet_published(&self) -> bool {
        matches!(self, Self::NotYetPublished { .. })
    }
}
