//! Forecast regions and their synthesis profiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the seven dashboard regions
///
/// The Thai name is the persisted and wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    North,
    Northeast,
    Central,
    East,
    SouthEastCoast,
    SouthWestCoast,
    BangkokMetropolitan,
}

/// Base climate used when synthesizing a region's forecasts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProfile {
    pub base_temperature_c: f64,
    /// Fraction that centers the rain percentage
    ///
    /// Kept at or below 0.5 so cloud cover stays under 80% and the sky
    /// cover percentages never sum past 100.
    pub rain_bias: f64,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::North,
        Region::Northeast,
        Region::Central,
        Region::East,
        Region::SouthEastCoast,
        Region::SouthWestCoast,
        Region::BangkokMetropolitan,
    ];

    pub fn name_th(&self) -> &'static str {
        match self {
            Region::North => "ภาคเหนือ",
            Region::Northeast => "ภาคตะวันออกเฉียงเหนือ",
            Region::Central => "ภาคกลาง",
            Region::East => "ภาคตะวันออก",
            Region::SouthEastCoast => "ภาคใต้(ฝั่งตะวันออก)",
            Region::SouthWestCoast => "ภาคใต้(ฝั่งตะวันตก)",
            Region::BangkokMetropolitan => "กรุงเทพและปริมณฑล",
        }
    }

    pub fn profile(&self) -> RegionProfile {
        let (base_temperature_c, rain_bias) = match self {
            Region::North => (24.0, 0.35),
            Region::Northeast => (28.0, 0.25),
            Region::Central => (30.0, 0.3),
            Region::East => (29.0, 0.35),
            Region::SouthEastCoast => (28.0, 0.45),
            Region::SouthWestCoast => (28.0, 0.5),
            Region::BangkokMetropolitan => (31.0, 0.28),
        };
        RegionProfile {
            base_temperature_c,
            rain_bias,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_th())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.name_th() == s)
            .ok_or_else(|| DomainError::UnknownRegion(s.to_string()))
    }
}

impl Serialize for Region {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name_th())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_names_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.name_th().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_unknown_region() {
        assert!("ภาคอีสาน".parse::<Region>().is_err());
    }

    #[test]
    fn test_profiles_are_sane() {
        for region in Region::ALL {
            let p = region.profile();
            assert!((0.0..=1.0).contains(&p.rain_bias));
            assert!(p.base_temperature_c > 20.0 && p.base_temperature_c < 35.0);
        }
    }
}
