//! Station descriptors and the built-in station set.

use crate::types::channel::Channel;
use serde::{Deserialize, Serialize};

/// Configuration tuple identifying a weather station and the quantity scraped
/// for it. The set is fixed at build or config time, never discovered at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Station name as it appears in the output records, e.g. `"WAKKANAI"`.
    pub name: String,
    /// Site identifier used by the portal's station dropdown.
    pub block_no: String,
    /// Quantity scraped for this station.
    pub channel: Channel,
}

impl StationConfig {
    pub fn new(name: impl Into<String>, block_no: impl Into<String>, channel: Channel) -> Self {
        StationConfig {
            name: name.into(),
            block_no: block_no.into(),
            channel,
        }
    }
}

/// The default job: eight Hokkaido stations, temperature for four of them and
/// wind speed for the other four.
pub fn default_stations() -> Vec<StationConfig> {
    vec![
        StationConfig::new("WAKKANAI", "47401", Channel::Temperature),
        StationConfig::new("HABORO", "47404", Channel::Temperature),
        StationConfig::new("RUMOI", "47406", Channel::Temperature),
        StationConfig::new("OBIHIRO", "47417", Channel::Temperature),
        StationConfig::new("OMU", "47405", Channel::WindSpeed),
        StationConfig::new("SUTTSU", "47421", Channel::WindSpeed),
        StationConfig::new("MURORAN", "47423", Channel::WindSpeed),
        StationConfig::new("KUTCHAN", "47433", Channel::WindSpeed),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_four_stations_per_channel() {
        let stations = default_stations();
        assert_eq!(stations.len(), 8);
        for channel in Channel::ALL {
            assert_eq!(
                stations.iter().filter(|s| s.channel == channel).count(),
                4
            );
        }
    }

    #[test]
    fn station_config_round_trips_through_serde() {
        let station = StationConfig::new("WAKKANAI", "47401", Channel::Temperature);
        let json = serde_json::to_string(&station).unwrap();
        assert_eq!(
            serde_json::from_str::<StationConfig>(&json).unwrap(),
            station
        );
    }
}
