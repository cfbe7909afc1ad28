use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Gave up on {url} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("Station selection form not found on result page for station '{station}'")]
    MissingStationForm { station: String },

    #[error("No observation tables found on result page for station '{station}'")]
    NoYearTables { station: String },

    #[error("Unexpected table shape for station '{station}', row '{year}': expected {expected} cells, found {found}")]
    TableShape {
        station: String,
        year: String,
        expected: usize,
        found: usize,
    },

    #[error("Cannot parse year cell '{cell}' for station '{station}'")]
    YearParse { station: String, cell: String },
}

impl ScrapeError {
    /// Structural failures mean the page did not have the expected shape.
    /// They are fatal for one station only; the run skips it and continues.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ScrapeError::MissingStationForm { .. }
                | ScrapeError::NoYearTables { .. }
                | ScrapeError::TableShape { .. }
                | ScrapeError::YearParse { .. }
        )
    }

    /// Transient failures are worth a bounded retry before giving up.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            ScrapeError::NetworkRequest(..) => true,
            ScrapeError::HttpStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
