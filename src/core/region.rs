use serde::{Deserialize, Serialize};

/// Swedish electricity bidding zone.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    clap::ValueEnum,
    derive_more::Display,
)]
pub enum Region {
    /// Luleå
    #[display("SE1")]
    Se1,

    /// Sundsvall
    #[display("SE2")]
    Se2,

    /// Stockholm
    #[default]
    #[display("SE3")]
    Se3,

    /// Malmö
    #[display("SE4")]
    Se4,
}

impl Region {
    /// Zone number as used in the price API paths.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Se1 => 1,
            Self::Se2 => 2,
            Self::Se3 => 3,
            Self::Se4 => 4,
        }
    }

    #[must_use]
    pub const fn city(self) -> &'static str {
        match self {
            Self::Se1 => "Luleå",
            Self::Se2 => "Sundsvall",
            Self::Se3 => "Stockholm",
            Self::Se4 => "Malmö",
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn test_codes() {
        let regions = [Region::Se1, Region::Se2, Region::Se3, Region::Se4];
        assert_eq!(regions.map(Region::code), [1, 2, 3, 4]);
        assert_eq!(Region::default(), Region::Se3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Region::Se4.to_string(), "SE4");
    }

    #[test]
    fn test_from_cli_value() {
        assert_eq!(Region::from_str("se1", true).unwrap(), Region::Se1);
        assert_eq!(Region::from_str("SE2", true).unwrap(), Region::Se2);
    }
}
