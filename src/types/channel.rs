//! Defines the measurement channel requested from the portal and the opaque
//! form codes used to select it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical quantity requested from the portal for a station.
///
/// Each station in the configured set is scraped for exactly one channel, and
/// each channel accumulates into its own output dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Monthly mean air temperature.
    Temperature,
    /// Monthly mean wind speed.
    WindSpeed,
}

impl Channel {
    /// Both channels, in output order.
    pub const ALL: [Channel; 2] = [Channel::Temperature, Channel::WindSpeed];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::WindSpeed => "wind-speed",
        }
    }

    /// Fixed relative filename the channel's dataset is written to.
    pub fn output_filename(&self) -> &'static str {
        match self {
            Channel::Temperature => "data_temp.json",
            Channel::WindSpeed => "data_wind.json",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Option values the portal's channel dropdown uses to select a quantity.
///
/// These are opaque portal-side codes, not stable identifiers; they are never
/// compared anywhere else in the pipeline, only substituted into the request.
/// Override them if the portal renumbers its dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCodes {
    temperature: String,
    wind_speed: String,
}

impl ChannelCodes {
    pub fn new(temperature: impl Into<String>, wind_speed: impl Into<String>) -> Self {
        Self {
            temperature: temperature.into(),
            wind_speed: wind_speed.into(),
        }
    }

    /// The form code submitted for `channel`.
    pub fn code(&self, channel: Channel) -> &str {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::WindSpeed => &self.wind_speed,
        }
    }
}

impl Default for ChannelCodes {
    fn default() -> Self {
        ChannelCodes::new("1", "4")
    }
}
