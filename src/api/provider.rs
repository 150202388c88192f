use async_trait::async_trait;
use chrono::{DateTime, Days, Local, NaiveDate};

use crate::{
    api::FetchError,
    core::{cutoff::PublicationCutoff, day::PriceDay, region::Region, statistics},
    prelude::*,
};

/// Source of day-ahead prices.
///
/// Dates are calendar dates in the local time zone of the caller.
#[async_trait]
pub trait PriceProvider: Sync {
    /// Fetch all hourly prices on the specified day, one request per call.
    async fn fetch(&self, on: NaiveDate, region: Region) -> Result<PriceDay, FetchError>;

    /// Fetch the prices unless `on` is too far ahead of `now` to have been published.
    async fn fetch_on(
        &self,
        now: DateTime<Local>,
        on: NaiveDate,
        region: Region,
    ) -> Result<PriceDay, FetchError> {
        if on > now.date_naive() + Days::new(1) {
            debug!(%on, "too far ahead");
            return Err(FetchError::NotYetPublished { on });
        }
        self.fetch(on, region).await
    }

    async fn fetch_today(
        &self,
        now: DateTime<Local>,
        region: Region,
    ) -> Result<PriceDay, FetchError> {
        self.fetch_on(now, now.date_naive(), region).await
    }

    async fn fetch_yesterday(
        &self,
        now: DateTime<Local>,
        region: Region,
    ) -> Result<PriceDay, FetchError> {
        self.fetch_on(now, now.date_naive() - Days::new(1), region).await
    }

    /// Skips the request before the publication cutoff.
    async fn fetch_tomorrow(
        &self,
        now: DateTime<Local>,
        region: Region,
        cutoff: PublicationCutoff,
    ) -> Result<PriceDay, FetchError> {
        let on = now.date_naive() + Days::new(1);
        if !statistics::tomorrow_available_at(now, cutoff) {
            debug!(%on, %cutoff, "before the cutoff");
            return Err(FetchError::NotYetPublished { on });
        }
        self.fetch_on(now, on, region).await
    }
}
