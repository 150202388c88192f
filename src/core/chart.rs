use std::ops::RangeInclusive;

use chrono::{DateTime, Local, Timelike};

use crate::{
    core::{
        day::PriceDay,
        statistics::{self, StatisticsError},
    },
    quantity::rate::KilowattHourRate,
};

pub type Point = (DateTime<Local>, KilowattHourRate);

/// One day's line on the price chart.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSeries {
    /// Step points: hour starts plus the closing point at the end of the day.
    pub steps: Vec<Point>,

    pub average: KilowattHourRate,
}

impl ChartSeries {
    pub fn try_new(day: &PriceDay) -> Result<Self, StatisticsError> {
        let last = day.last().ok_or(StatisticsError::EmptyInput)?;
        let steps = day
            .iter()
            .map(|price| (price.interval.start, price.rate))
            .chain([(last.interval.end, last.rate)])
            .collect();
        Ok(Self { steps, average: statistics::average(day)? })
    }

    /// Rates without the closing point.
    pub fn rates(&self) -> impl Iterator<Item = KilowattHourRate> + '_ {
        self.steps.iter().take(self.steps.len().saturating_sub(1)).map(|(_, rate)| *rate)
    }
}

/// Dataset of the expanded view.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartData {
    pub today: ChartSeries,
    pub tomorrow: Option<ChartSeries>,

    /// Current time and price.
    pub marker: Point,

    /// Y-axis limits covering all plotted rates with a 10% margin, never below zero.
    pub y_limits: RangeInclusive<KilowattHourRate>,
}

impl ChartData {
    pub fn try_new(
        today: &PriceDay,
        tomorrow: Option<&PriceDay>,
        now: DateTime<Local>,
    ) -> Result<Self, StatisticsError> {
        let marker = (now, statistics::current_price(today, now.hour() as usize)?);
        let today = ChartSeries::try_new(today)?;
        let tomorrow = tomorrow.map(ChartSeries::try_new).transpose()?;
        let y_limits = Self::y_limits(&today, tomorrow.as_ref())?;
        Ok(Self { today, tomorrow, marker, y_limits })
    }

    fn y_limits(
        today: &ChartSeries,
        tomorrow: Option<&ChartSeries>,
    ) -> Result<RangeInclusive<KilowattHourRate>, StatisticsError> {
        let rates = || today.rates().chain(tomorrow.into_iter().flat_map(ChartSeries::rates));
        let min = rates().min().ok_or(StatisticsError::EmptyInput)?;
        let max = rates().max().ok_or(StatisticsError::EmptyInput)?;
        let lower = (min * 0.9).max(KilowattHourRate::ZERO);
        let upper = (max * 1.1).max(lower);
        Ok(lower..=upper)
    }
}
