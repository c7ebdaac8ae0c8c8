//! Timeframe definitions for market data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    #[default]
    Daily,
    #[serde(rename = "1w")]
    Weekly,
}

impl Timeframe {
    /// Get the duration of the timeframe in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Minute30 => 1800,
            Timeframe::Hour1 => 3600,
            Timeframe::Hour4 => 14400,
            Timeframe::Daily => 86400,
            Timeframe::Weekly => 604800,
        }
    }

    /// Get the duration of the timeframe in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.as_secs() as i64 * 1000
    }

    /// Human readable name used in chart titles ("Daily", "4-Hour").
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1-Minute",
            Timeframe::Minute5 => "5-Minute",
            Timeframe::Minute15 => "15-Minute",
            Timeframe::Minute30 => "30-Minute",
            Timeframe::Hour1 => "1-Hour",
            Timeframe::Hour4 => "4-Hour",
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
        }
    }

    /// Short upper-case tag used in chart file names ("1D", "4H").
    pub fn file_tag(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1w",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "1" => Ok(Timeframe::Minute1),
            "5m" | "5min" | "5" => Ok(Timeframe::Minute5),
            "15m" | "15min" | "15" => Ok(Timeframe::Minute15),
            "30m" | "30min" | "30" => Ok(Timeframe::Minute30),
            "1h" | "1hour" | "hour" | "hourly" | "60" => Ok(Timeframe::Hour1),
            "4h" | "4hour" | "240" | "intraday" => Ok(Timeframe::Hour4),
            "1d" | "d" | "day" | "daily" => Ok(Timeframe::Daily),
            "1w" | "w" | "week" | "weekly" => Ok(Timeframe::Weekly),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}
