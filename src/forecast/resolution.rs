use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::ForecastError;

/// Bucket widths the engine can report at, ordered finest to coarsest
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resolution {
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "3hour")]
    ThreeHours,
    #[serde(rename = "6hour")]
    SixHours,
    #[serde(rename = "1day")]
    OneDay,
}

impl Resolution {
    pub const ALL: [Resolution; 6] = [
        Resolution::FifteenMinutes,
        Resolution::ThirtyMinutes,
        Resolution::OneHour,
        Resolution::ThreeHours,
        Resolution::SixHours,
        Resolution::OneDay,
    ];

    /// Finest resolution the upstream forecast producer emits
    pub const BASE: Resolution = Resolution::FifteenMinutes;

    pub fn minutes(&self) -> u32 {
        match self {
            Resolution::FifteenMinutes => 15,
            Resolution::ThirtyMinutes => 30,
            Resolution::OneHour => 60,
            Resolution::ThreeHours => 180,
            Resolution::SixHours => 360,
            Resolution::OneDay => 1440,
        }
    }

    pub fn hours(&self) -> f64 {
        self.minutes() as f64 / 60.0
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.minutes() as i64)
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.minutes() as i64 == minutes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::FifteenMinutes => "15min",
            Resolution::ThirtyMinutes => "30min",
            Resolution::OneHour => "1hour",
            Resolution::ThreeHours => "3hour",
            Resolution::SixHours => "6hour",
            Resolution::OneDay => "1day",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| ForecastError::UnsupportedResolution(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!("15min".parse::<Resolution>().unwrap(), Resolution::FifteenMinutes);
        assert_eq!("1hour".parse::<Resolution>().unwrap(), Resolution::OneHour);
        assert_eq!(" 1day ".parse::<Resolution>().unwrap(), Resolution::OneDay);
        assert!(matches!(
            "2hour".parse::<Resolution>(),
            Err(ForecastError::UnsupportedResolution(_))
        ));
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(Resolution::ThreeHours.minutes(), 180);
        assert_eq!(Resolution::OneDay.hours(), 24.0);
        assert_eq!(Resolution::FifteenMinutes.hours(), 0.25);
        assert_eq!(Resolution::from_minutes(360), Some(Resolution::SixHours));
        assert_eq!(Resolution::from_minutes(45), None);
    }

    #[test]
    fn test_ordering_is_finest_first() {
        let mut shuffled = vec![Resolution::OneDay, Resolution::FifteenMinutes, Resolution::OneHour];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Resolution::FifteenMinutes, Resolution::OneHour, Resolution::OneDay]
        );
    }

    #[test]
    fn test_serde_names_match_display() {
        for resolution in Resolution::ALL {
            let json = serde_json::to_string(&resolution).unwrap();
            assert_eq!(json, format!("\"{}\"", resolution));
        }
    }
}
