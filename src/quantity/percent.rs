quantity!(
    /// Relative change in percent.
    PercentChange, format: "{:+.1}%"
);

impl PercentChange {
    /// Relative change from `base` to `value`, rounded to one decimal.
    ///
    /// Undefined for the zero base.
    #[must_use]
    pub fn between(value: f64, base: f64) -> Option<Self> {
        if base == 0.0 {
            return None;
        }
        let percent = (value - base) / base * 100.0;
        Some(Self((percent * 10.0).round() / 10.0))
    }

    /// Positive means the value has gone up.
    #[must_use]
    pub fn is_increase(self) -> bool {
        self.0 > 0.0
    }
}
