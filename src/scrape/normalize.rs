//! Expands a parsed year-table into monthly time-series records.

use crate::scrape::sanitize::strip_revision_note;
use crate::scrape::table::{YearTable, MONTHS_PER_YEAR};
use crate::types::observation::{Observation, ObservationValue};
use chrono::NaiveDate;

/// Twelve observations for one year of one station, in calendar order.
///
/// The pairing is strictly positional: the value at position `m` belongs to
/// calendar month `m`, timestamped on the first day of that month. Cells are
/// sanitized before parsing; a cell that remains non-numeric is emitted as an
/// invalid observation rather than dropped, so every well-formed year-table
/// yields exactly twelve records.
pub fn monthly_observations(table: &YearTable, station: &str) -> Vec<Observation> {
    table
        .values
        .iter()
        .take(MONTHS_PER_YEAR)
        .enumerate()
        .map(|(index, raw)| {
            let month = index as u32 + 1;
            let clean = strip_revision_note(raw);
            Observation {
                time: first_of_month(table.year, month),
                value: ObservationValue::parse(clean),
                station: station.to_string(),
            }
        })
        .collect()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is confined to 1..=12 above and every month has a day 1
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of a calendar month")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(year: i32, values: &[&str]) -> YearTable {
        YearTable {
            year,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn twelve() -> Vec<String> {
        (1..=12).map(|m| format!("{m}.0")).collect()
    }

    #[test]
    fn emits_twelve_records_with_first_of_month_timestamps() {
        let values = twelve();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let records = monthly_observations(&table(1991, &refs), "WAKKANAI");
        assert_eq!(records.len(), 12);
        for (index, record) in records.iter().enumerate() {
            let expected =
                NaiveDate::from_ymd_opt(1991, index as u32 + 1, 1).unwrap();
            assert_eq!(record.time, expected);
            assert_eq!(record.value, ObservationValue::Number(index as f64 + 1.0));
            assert_eq!(record.station, "WAKKANAI");
        }
    }

    #[test]
    fn pairing_is_positional() {
        let refs = [
            "0.5", "9.9", "1.5", "2.5", "3.5", "4.5", "5.5", "6.5", "7.5", "8.5", "10.5", "11.5",
        ];
        let records = monthly_observations(&table(2003, &refs), "RUMOI");
        assert_eq!(records[1].value, ObservationValue::Number(9.9));
        assert_eq!(
            records[1].time,
            NaiveDate::from_ymd_opt(2003, 2, 1).unwrap()
        );
    }

    #[test]
    fn annotated_cells_are_sanitized_before_parsing() {
        let refs = [
            "5.3\nRevision: 12.-",
            "2.0",
            "3.0",
            "4.0",
            "5.0",
            "6.0",
            "7.0",
            "8.0",
            "9.0",
            "10.0",
            "11.0",
            "12.0",
        ];
        let records = monthly_observations(&table(1991, &refs), "WAKKANAI");
        assert_eq!(records[0].value, ObservationValue::Number(5.3));
    }

    #[test]
    fn non_numeric_cells_become_invalid_records() {
        let refs = [
            "1.0", "///", "3.0", "4.0", "5.0", "6.0", "7.0", "8.0", "9.0", "10.0", "11.0", "12.0",
        ];
        let records = monthly_observations(&table(1991, &refs), "WAKKANAI");
        assert_eq!(records.len(), 12);
        assert_eq!(
            records[1].value,
            ObservationValue::Invalid("///".to_string())
        );
    }
}
