//! The per-channel result datasets and their one-shot serialization.

use crate::error::JmastatError;
use crate::types::channel::Channel;
use crate::types::observation::Observation;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only observation datasets, one per measurement channel.
///
/// Records keep insertion order across stations and years as they were
/// scraped; there is no deduplication or update semantics. The accumulator is
/// threaded explicitly through the run and held in memory until the final
/// write.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrapeResults {
    temperature: Vec<Observation>,
    wind_speed: Vec<Observation>,
}

impl ScrapeResults {
    pub fn new() -> Self {
        ScrapeResults::default()
    }

    /// The records accumulated for `channel`, in append order.
    pub fn dataset(&self, channel: Channel) -> &[Observation] {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::WindSpeed => &self.wind_speed,
        }
    }

    /// Appends freshly scraped records to the channel's dataset.
    pub fn append(&mut self, channel: Channel, records: Vec<Observation>) {
        let dataset = match channel {
            Channel::Temperature => &mut self.temperature,
            Channel::WindSpeed => &mut self.wind_speed,
        };
        dataset.extend(records);
    }

    pub fn len(&self) -> usize {
        self.temperature.len() + self.wind_speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes each dataset as a JSON array of records to its fixed filename
    /// inside `dir`, in one shot at the end of a run.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), JmastatError> {
        for channel in Channel::ALL {
            let path = dir.join(channel.output_filename());
            let file =
                File::create(&path).map_err(|e| JmastatError::OutputWrite(path.clone(), e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self.dataset(channel))
                .map_err(|e| JmastatError::OutputSerialize(path.clone(), e))?;
            writer
                .flush()
                .map_err(|e| JmastatError::OutputWrite(path.clone(), e))?;
            info!(
                "Wrote {} {channel} records to {}",
                self.dataset(channel).len(),
                path.display()
            );
        }
        Ok(())
    }
}
