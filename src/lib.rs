mod dataset;
mod error;
mod jmastat;
mod scrape;
mod stations;
mod types;

pub use error::JmastatError;
pub use jmastat::*;

pub use dataset::ScrapeResults;
pub use stations::{default_stations, StationConfig};

pub use types::channel::{Channel, ChannelCodes};
pub use types::observation::{Observation, ObservationValue};

pub use scrape::error::ScrapeError;
pub use scrape::fetcher::PORTAL_URL;
pub use scrape::normalize::monthly_observations;
pub use scrape::sanitize::strip_revision_note;
pub use scrape::table::{parse_year_tables, YearTable, MONTHS_PER_YEAR};
