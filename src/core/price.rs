use crate::{core::interval::Interval, quantity::rate::KilowattHourRate};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HourlyPrice {
    pub interval: Interval,
    pub rate: KilowattHourRate,
}

impl HourlyPrice {
    pub const fn new(interval: Interval, rate: KilowattHourRate) -> Self {
        Self { interval, rate }
    }
}
