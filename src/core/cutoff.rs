use std::str::FromStr;

use chrono::Timelike;

use crate::prelude::*;

/// Local hour since which the next day's prices are expected to be published.
///
/// Day-ahead prices are normally out around 13:00 but the API makes no promise about it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
#[display("{_0:02}:00")]
pub struct PublicationCutoff(u32);

impl PublicationCutoff {
    pub const DEFAULT: Self = Self(13);

    pub fn try_new(hour: u32) -> Result<Self> {
        ensure!(hour < 24, "cutoff hour must be within 0-23, got {hour}");
        Ok(Self(hour))
    }

    /// Tells whether tomorrow's prices are worth asking for at `now`.
    #[must_use]
    pub fn is_passed_at(self, now: impl Timelike) -> bool {
        now.hour() >= self.0
    }
}

impl Default for PublicationCutoff {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for PublicationCutoff {
    type Err = Error;

    fn from_str(hour: &str) -> Result<Self> {
        Self::try_new(hour.parse().with_context(|| format!("`{hour}` is not an hour"))?)
    }
}
