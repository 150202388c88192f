use std::ops::Deref;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};
use itertools::Itertools;

use crate::{
    core::{interval::Interval, price::HourlyPrice, region::Region},
    quantity::rate::KilowattHourRate,
};

/// Hourly prices of one calendar day in one region, hour 00-01 first.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceDay {
    pub date: NaiveDate,
    pub region: Region,
    prices: [HourlyPrice; PriceDay::N_HOURS],
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DayError {
    #[error("expected {expected} hourly prices, got {actual}", expected = PriceDay::N_HOURS)]
    WrongNumberOfHours { actual: usize },

    #[error("no price for hour {hour:02}")]
    MissingHour { hour: usize },

    #[error("hour {hour:02} does not exist in the local time zone")]
    NonexistentHour { hour: usize },

    #[error("price for {actual} does not belong to {expected}")]
    UnexpectedDate { expected: NaiveDate, actual: NaiveDate },
}

/// Sub-hourly rates of a single wall-clock hour being averaged.
#[derive(Copy, Clone)]
struct HourAccumulator {
    interval: Interval,
    sum: f64,
    n_rates: u32,
}

impl HourAccumulator {
    const fn new(interval: Interval, rate: KilowattHourRate) -> Self {
        Self { interval, sum: rate.0, n_rates: 1 }
    }

    fn add(mut self, end: DateTime<Local>, rate: KilowattHourRate) -> Self {
        self.interval = self.interval.with_end(self.interval.end.max(end));
        self.sum += rate.0;
        self.n_rates += 1;
        self
    }

    fn finish(self) -> HourlyPrice {
        HourlyPrice::new(self.interval, KilowattHourRate(self.sum / f64::from(self.n_rates)))
    }
}

impl PriceDay {
    pub const N_HOURS: usize = 24;

    /// Build the day from timestamped rates of any resolution.
    ///
    /// Rates get grouped by their own wall-clock hour, so that index 0 is always 00-01
    /// in the market time zone. Sub-hourly rates are averaged.
    pub fn try_from_rates<Tz: TimeZone>(
        date: NaiveDate,
        region: Region,
        rates: impl IntoIterator<Item = (DateTime<Tz>, DateTime<Tz>, KilowattHourRate)>,
    ) -> Result<Self, DayError> {
        let mut hours: [Option<HourAccumulator>; Self::N_HOURS] = [None; Self::N_HOURS];
        let rates = rates.into_iter().sorted_by(|lhs, rhs| lhs.0.cmp(&rhs.0));
        for (start, end, rate) in rates {
            let wall_clock = start.naive_local();
            if wall_clock.date() != date {
                return Err(DayError::UnexpectedDate { expected: date, actual: wall_clock.date() });
            }
            let hour = wall_clock.hour() as usize;
            let (start, end) = (start.with_timezone(&Local), end.with_timezone(&Local));
            hours[hour] = Some(match hours[hour] {
                Some(accumulator) => accumulator.add(end, rate),
                None => HourAccumulator::new(Interval::new(start, end), rate),
            });
        }
        let prices = hours
            .into_iter()
            .enumerate()
            .map(|(hour, accumulator)| {
                accumulator.map(HourAccumulator::finish).ok_or(DayError::MissingHour { hour })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(date, region, prices)
    }

    /// Build the day from exactly 24 rates in hour order, without timestamps.
    pub fn try_from_hourly(
        date: NaiveDate,
        region: Region,
        rates: impl IntoIterator<Item = KilowattHourRate>,
    ) -> Result<Self, DayError> {
        let rates = rates.into_iter().collect_vec();
        if rates.len() != Self::N_HOURS {
            return Err(DayError::WrongNumberOfHours { actual: rates.len() });
        }
        let prices = rates
            .into_iter()
            .enumerate()
            .map(|(hour, rate)| {
                #[allow(clippy::cast_possible_truncation)]
                let start = date
                    .and_hms_opt(hour as u32, 0, 0)
                    .and_then(|naive| Local.from_local_datetime(&naive).earliest())
                    .ok_or(DayError::NonexistentHour { hour })?;
                Ok(HourlyPrice::new(Interval::hour_from(start), rate))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(date, region, prices)
    }

    fn try_new(date: NaiveDate, region: Region, prices: Vec<HourlyPrice>) -> Result<Self, DayError> {
        let prices = prices
            .try_into()
            .map_err(|prices: Vec<_>| DayError::WrongNumberOfHours { actual: prices.len() })?;
        Ok(Self { date, region, prices })
    }
}

impl Deref for PriceDay {
    type Target = [HourlyPrice];

    fn deref(&self) -> &Self::Target {
        &self.prices
    }
}

#[cfg(test)]
pub mod tests {
    use chrono::{FixedOffset, TimeDelta};

    use super::*;

    pub fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    /// Build a test day in the default region.
    pub fn day(rates: impl IntoIterator<Item = f64>) -> PriceDay {
        PriceDay::try_from_hourly(date(), Region::Se3, rates.into_iter().map(KilowattHourRate))
            .unwrap()
    }

    fn stockholm_summer() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn quarters(
        n_quarters: i64,
        rate: impl Fn(i64) -> f64,
    ) -> Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>, KilowattHourRate)> {
        let midnight = date().and_hms_opt(0, 0, 0).unwrap();
        let midnight = stockholm_summer().from_local_datetime(&midnight).unwrap();
        (0..n_quarters)
            .map(|index| {
                let start = midnight + TimeDelta::minutes(15 * index);
                (start, start + TimeDelta::minutes(15), KilowattHourRate(rate(index)))
            })
            .collect()
    }

    #[test]
    fn test_try_from_hourly_ok() {
        let day = day((0..24).map(f64::from));
        assert_eq!(day.len(), 24);
        assert_eq!(day[5].rate, KilowattHourRate(5.0));
        assert_eq!(day[5].interval.start.hour(), 5);
        assert_eq!(day[5].interval.duration(), TimeDelta::hours(1));
    }

    #[test]
    fn test_try_from_hourly_wrong_length() {
        let error = PriceDay::try_from_hourly(date(), Region::Se1, [KilowattHourRate(1.0); 23])
            .unwrap_err();
        assert_eq!(error, DayError::WrongNumberOfHours { actual: 23 });
    }

    #[test]
    fn test_try_from_rates_averages_quarters() {
        #[allow(clippy::cast_precision_loss)]
        let rates = quarters(96, |index| (index / 4) as f64 + (index % 4) as f64 * 0.1);
        let day = PriceDay::try_from_rates(date(), Region::Se3, rates).unwrap();
        assert_eq!(day.len(), 24);
        approx::assert_abs_diff_eq!(day[0].rate.0, 0.15, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(day[23].rate.0, 23.15, epsilon = 1e-9);
        assert_eq!(day[7].interval.duration(), TimeDelta::hours(1));
    }

    #[test]
    fn test_try_from_rates_unordered() {
        let mut rates = quarters(96, |index| (index / 4) as f64);
        rates.reverse();
        let day = PriceDay::try_from_rates(date(), Region::Se3, rates).unwrap();
        assert_eq!(day[0].rate, KilowattHourRate(0.0));
        assert_eq!(day[12].rate, KilowattHourRate(12.0));
        assert!(day.iter().is_sorted_by_key(|price| price.interval.start));
    }

    #[test]
    fn test_try_from_rates_missing_hour() {
        let rates = quarters(92, |_| 1.0);
        let error = PriceDay::try_from_rates(date(), Region::Se3, rates).unwrap_err();
        assert_eq!(error, DayError::MissingHour { hour: 23 });
    }

    #[test]
    fn test_try_from_rates_foreign_date() {
        let rates = quarters(100, |_| 1.0);
        let error = PriceDay::try_from_rates(date(), Region::Se3, rates).unwrap_err();
        assert!(matches!(error, DayError::UnexpectedDate { .. }));
    }
}
