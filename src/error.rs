use crate::scrape::error::ScrapeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JmastatError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("Failed to write output file '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize dataset to '{0}'")]
    OutputSerialize(PathBuf, #[source] serde_json::Error),
}
