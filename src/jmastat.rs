//! The main entry point for scraping the JMA monthly statistics portal.
//!
//! A [`Jmastat`] client walks a configured set of stations in order, submits
//! the station/channel selection for each, parses the returned year-tables
//! into monthly observation records, and accumulates them into per-channel
//! result datasets.
//!
//! Unlike an all-or-nothing batch, failures are classified: transient network
//! failures are retried with backoff inside the fetcher, a station whose page
//! does not have the expected shape is logged and skipped while the run
//! continues, and a cell that cannot be read as a number is emitted as an
//! invalid record instead of being dropped.

use crate::dataset::ScrapeResults;
use crate::error::JmastatError;
use crate::scrape::error::ScrapeError;
use crate::scrape::fetcher::{has_station_form, PageFetcher, PORTAL_URL};
use crate::scrape::normalize::monthly_observations;
use crate::scrape::table::parse_year_tables;
use crate::stations::{default_stations, StationConfig};
use crate::types::channel::ChannelCodes;
use bon::bon;
use log::{info, warn};

const DEFAULT_MAX_RETRIES: u32 = 2;

/// The scraping client.
///
/// Construct one with the builder; every knob is optional and defaults to the
/// built-in job (the eight-station set, the portal's production URL, the
/// default channel codes).
///
/// # Examples
///
/// ```no_run
/// # use jmastat::{Jmastat, JmastatError};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), JmastatError> {
/// let scraper = Jmastat::builder().build();
/// let results = scraper.run().await?;
/// results.write_to_dir(Path::new("."))?;
/// # Ok(())
/// # }
/// ```
pub struct Jmastat {
    fetcher: PageFetcher,
    stations: Vec<StationConfig>,
    codes: ChannelCodes,
}

#[bon]
impl Jmastat {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.stations(Vec<StationConfig>)`: Optional. The stations to scrape, in
    ///   run order. Defaults to [`default_stations()`].
    /// * `.channel_codes(ChannelCodes)`: Optional. The opaque form codes used
    ///   to select each channel. Defaults to the portal's current dropdown
    ///   values.
    /// * `.portal_url(String)`: Optional. Override the portal endpoint, e.g.
    ///   to point at a local copy of the site.
    /// * `.max_retries(u32)`: Optional. Retries after a transient fetch
    ///   failure before the run is aborted. Defaults to 2.
    #[builder]
    pub fn new(
        stations: Option<Vec<StationConfig>>,
        channel_codes: Option<ChannelCodes>,
        portal_url: Option<String>,
        max_retries: Option<u32>,
    ) -> Self {
        Jmastat {
            fetcher: PageFetcher::new(
                portal_url.unwrap_or_else(|| PORTAL_URL.to_string()),
                max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            ),
            stations: stations.unwrap_or_else(default_stations),
            codes: channel_codes.unwrap_or_default(),
        }
    }

    /// Scrapes every configured station in order and returns the accumulated
    /// datasets. Nothing is written to disk; pass the result to
    /// [`ScrapeResults::write_to_dir`] for the output files.
    ///
    /// Stations are processed sequentially in one session. A station whose
    /// page has an unexpected shape is skipped with a warning; a fetch failure
    /// that survives the retry budget aborts the run with no output.
    ///
    /// # Errors
    ///
    /// Returns [`JmastatError::Scrape`] when a page cannot be fetched (after
    /// retries for transient failures).
    pub async fn run(&self) -> Result<ScrapeResults, JmastatError> {
        let mut results = ScrapeResults::new();
        for station in &self.stations {
            info!("Starting job for {}", station.name);
            let page = self
                .fetcher
                .monthly_page(&station.block_no, self.codes.code(station.channel))
                .await?;
            match self.collect_station(station, &page, &mut results) {
                Ok(appended) => {
                    info!("Finished job for {} ({appended} records)", station.name)
                }
                Err(e) if e.is_structural() => {
                    warn!("Skipping station {}: {e}", station.name)
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(results)
    }

    /// Parses one result page for `station` and appends its observations to
    /// the dataset selected by the station's channel. Returns the number of
    /// records appended.
    ///
    /// This is the offline core of [`run`](Jmastat::run): feed it a saved page
    /// body to re-ingest data without touching the network. On a structural
    /// error nothing is appended for the station.
    pub fn collect_station(
        &self,
        station: &StationConfig,
        page: &str,
        results: &mut ScrapeResults,
    ) -> Result<usize, ScrapeError> {
        if !has_station_form(page) {
            return Err(ScrapeError::MissingStationForm {
                station: station.name.clone(),
            });
        }
        let tables = parse_year_tables(page, &station.name)?;
        let mut records = Vec::new();
        for table in &tables {
            records.extend(monthly_observations(table, &station.name));
        }
        let appended = records.len();
        results.append(station.channel, records);
        Ok(appended)
    }
}
