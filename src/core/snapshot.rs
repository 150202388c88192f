use bon::Builder;
use chrono::{DateTime, Local, Timelike};

use crate::{
    api::{FetchError, PriceProvider},
    core::{
        chart::ChartData,
        cutoff::PublicationCutoff,
        day::PriceDay,
        region::Region,
        statistics::{self, DerivedStats, StatisticsError},
    },
    prelude::*,
};

/// Everything displayed after one refresh.
///
/// A refresh replaces the snapshot as a whole, nothing in it gets updated in place.
#[must_use]
#[derive(Builder)]
pub struct Snapshot {
    pub region: Region,
    pub taken_at: DateTime<Local>,
    pub today: Result<PriceDay, FetchError>,
    pub yesterday: Result<PriceDay, FetchError>,
    pub tomorrow: Result<PriceDay, FetchError>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("today's prices are unavailable")]
    TodayUnavailable,

    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}

impl Snapshot {
    /// Fetch yesterday, today, and tomorrow at once.
    #[instrument(skip_all, fields(region = %region, now = %now))]
    pub async fn fetch(
        provider: &dyn PriceProvider,
        region: Region,
        now: DateTime<Local>,
        cutoff: PublicationCutoff,
    ) -> Self {
        let (yesterday, today, tomorrow) = tokio::join!(
            provider.fetch_yesterday(now, region),
            provider.fetch_today(now, region),
            provider.fetch_tomorrow(now, region, cutoff),
        );
        for (label, result) in [("yesterday", &yesterday), ("today", &today), ("tomorrow", &tomorrow)]
        {
            match result {
                Ok(_) => {}
                Err(error) if error.is_not_yet_published() => info!(label, "not published yet"),
                Err(error) => warn!(label, error = %error, "unavailable"),
            }
        }
        Self::builder()
            .region(region)
            .taken_at(now)
            .yesterday(yesterday)
            .today(today)
            .tomorrow(tomorrow)
            .build()
    }

    pub fn stats(&self) -> Result<DerivedStats, SnapshotError> {
        let today = self.today.as_ref().map_err(|_| SnapshotError::TodayUnavailable)?;
        let yesterday = self.yesterday.as_ref().ok().map(|day| &day[..]);
        Ok(DerivedStats::try_compute(today, yesterday, self.current_hour())?)
    }

    pub fn chart(&self) -> Result<ChartData, SnapshotError> {
        let today = self.today.as_ref().map_err(|_| SnapshotError::TodayUnavailable)?;
        Ok(ChartData::try_new(today, self.tomorrow.as_ref().ok(), self.taken_at)?)
    }

    /// Whether tomorrow's prices are expected to be out at the time of the snapshot.
    #[must_use]
    pub fn is_tomorrow_due(&self, cutoff: PublicationCutoff) -> bool {
        statistics::tomorrow_available_at(self.taken_at, cutoff)
    }

    #[must_use]
    pub fn current_hour(&self) -> usize {
        self.taken_at.hour() as usize
    }
}
