//! Derived price statistics.
//!
//! Everything here is a pure function of the prices and, where it matters, of the local hour.

use chrono::Timelike;

use crate::{
    core::{cutoff::PublicationCutoff, price::HourlyPrice},
    quantity::{percent::PercentChange, rate::KilowattHourRate},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StatisticsError {
    #[error("no prices to compute statistics on")]
    EmptyInput,

    #[error("no price for hour index {index}")]
    IndexOutOfRange { index: usize },
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Extremes {
    pub max: KilowattHourRate,
    pub max_hour: usize,
    pub min: KilowattHourRate,
    pub min_hour: usize,
}

/// Values of the compact view.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DerivedStats {
    pub current: KilowattHourRate,
    pub current_hour: usize,
    pub average: KilowattHourRate,
    pub extremes: Extremes,

    /// Change of today's average against yesterday's one.
    pub percent_change_vs_yesterday: Option<PercentChange>,
}

impl DerivedStats {
    pub fn try_compute(
        today: &[HourlyPrice],
        yesterday: Option<&[HourlyPrice]>,
        current_hour: usize,
    ) -> Result<Self, StatisticsError> {
        Ok(Self {
            current: current_price(today, current_hour)?,
            current_hour,
            average: average(today)?,
            extremes: extremes(today)?,
            percent_change_vs_yesterday: percent_change(today, yesterday),
        })
    }
}

pub fn current_price(
    today: &[HourlyPrice],
    hour: usize,
) -> Result<KilowattHourRate, StatisticsError> {
    today
        .get(hour)
        .map(|price| price.rate)
        .ok_or(StatisticsError::IndexOutOfRange { index: hour })
}

pub fn average(prices: &[HourlyPrice]) -> Result<KilowattHourRate, StatisticsError> {
    if prices.is_empty() {
        return Err(StatisticsError::EmptyInput);
    }
    #[allow(clippy::cast_precision_loss)]
    let n_prices = prices.len() as f64;
    Ok(prices.iter().map(|price| price.rate).sum::<KilowattHourRate>() / n_prices)
}

/// Highest and lowest prices with their hours, the earliest hour wins on ties.
pub fn extremes(prices: &[HourlyPrice]) -> Result<Extremes, StatisticsError> {
    let (first, rest) = prices.split_first().ok_or(StatisticsError::EmptyInput)?;
    let initial = Extremes { max: first.rate, max_hour: 0, min: first.rate, min_hour: 0 };
    Ok(rest.iter().zip(1..).fold(initial, |mut extremes, (price, hour)| {
        if price.rate > extremes.max {
            extremes.max = price.rate;
            extremes.max_hour = hour;
        }
        if price.rate < extremes.min {
            extremes.min = price.rate;
            extremes.min_hour = hour;
        }
        extremes
    }))
}

/// Today's average against yesterday's, positive when today is more expensive.
#[must_use]
pub fn percent_change(
    today: &[HourlyPrice],
    yesterday: Option<&[HourlyPrice]>,
) -> Option<PercentChange> {
    let today = average(today).ok()?;
    let yesterday = average(yesterday?).ok()?;
    PercentChange::between(today.0, yesterday.0)
}

#[must_use]
pub fn tomorrow_available_at(now: impl Timelike, cutoff: PublicationCutoff) -> bool {
    cutoff.is_passed_at(now)
}
