//! Fetches result pages from the portal.
//!
//! The portal's selection form submits its dropdown values via query string,
//! so a parameterized GET against the fixed endpoint stands in for driving the
//! form: `block_no` carries the station dropdown selection and `view` the
//! channel option value. The owned [`reqwest::Client`] is the run's scoped
//! session; dropping it releases the connection pool on every exit path.

use crate::scrape::error::ScrapeError;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed portal endpoint serving the monthly statistics form and tables.
pub const PORTAL_URL: &str = "https://www.data.jma.go.jp/obd/stats/etrn/view/monthly_s3_en.php";

/// Name of the form's station dropdown.
pub(crate) const STATION_PARAM: &str = "block_no";

/// Parameter carrying the channel option value.
pub(crate) const CHANNEL_PARAM: &str = "view";

/// Label of the form's submit control.
pub(crate) const SUBMIT_LABEL: &str = "Refresh";

const BASE_RETRY_DELAY: Duration = Duration::from_secs(2);

pub struct PageFetcher {
    client: Client,
    portal_url: String,
    max_retries: u32,
}

impl PageFetcher {
    pub fn new(portal_url: String, max_retries: u32) -> Self {
        PageFetcher {
            client: Client::new(),
            portal_url,
            max_retries,
        }
    }

    /// Submits a station/channel selection and returns the result page body.
    ///
    /// Transient failures (connect and timeout errors, HTTP 5xx) are retried
    /// with exponential backoff up to the configured limit; other HTTP errors
    /// fail immediately.
    pub async fn monthly_page(
        &self,
        block_no: &str,
        channel_code: &str,
    ) -> Result<String, ScrapeError> {
        let url = self.page_url(block_no, channel_code);
        let mut attempt = 0;
        loop {
            match self.fetch(&url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = BASE_RETRY_DELAY * 2u32.pow(attempt);
                    warn!(
                        "Transient failure for {url} (attempt {}/{}), retrying in {delay:?}: {e}",
                        attempt + 1,
                        self.max_retries + 1
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_transient() => {
                    return Err(ScrapeError::RetriesExhausted {
                        url,
                        attempts: attempt + 1,
                        source: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub(crate) fn page_url(&self, block_no: &str, channel_code: &str) -> String {
        format!(
            "{}?{STATION_PARAM}={block_no}&{CHANNEL_PARAM}={channel_code}",
            self.portal_url
        )
    }

    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        info!("Fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {url}: {e:?}");
                return Err(if let Some(status) = e.status() {
                    ScrapeError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ScrapeError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .text()
            .await
            .map_err(|e| ScrapeError::NetworkRequest(url.to_string(), e))
    }
}

/// The result page always carries the selection form; its absence means the
/// portal markup contract changed underneath us.
pub(crate) fn has_station_form(page: &str) -> bool {
    let lower = page.to_ascii_lowercase();
    lower.contains(&format!("name=\"{STATION_PARAM}\""))
        || lower.contains(&format!("value=\"{}\"", SUBMIT_LABEL.to_ascii_lowercase()))
}
