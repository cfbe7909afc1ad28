//! Parses the portal's per-year observation tables.
//!
//! The result page renders observations in `data2_s` tables: a header row whose
//! first cell is the literal `Year`, then one row per year holding the year,
//! twelve monthly values left to right, and a trailing annual summary cell.

use crate::scrape::error::ScrapeError;
use crate::scrape::html::{cell_texts, class_contains, tag_blocks};
use log::debug;

/// Table class the portal renders observation tables with.
pub(crate) const DATA_TABLE_CLASS: &str = "data2_s";

/// First cell of the portal's header row.
const YEAR_HEADER_LABEL: &str = "Year";

/// Monthly cells per year row.
pub const MONTHS_PER_YEAR: usize = 12;

// year cell + twelve monthly cells + trailing annual summary cell
const CELLS_PER_YEAR_ROW: usize = MONTHS_PER_YEAR + 2;

/// Twelve raw monthly values for a single year, in calendar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTable {
    pub year: i32,
    pub values: Vec<String>,
}

/// Extracts every year of observations from a result page, top to bottom.
///
/// The header row never produces a table. A row with an unexpected cell count
/// or a non-numeric year is a structural error: the caller skips the whole
/// station rather than guessing which cells belong to which month.
pub fn parse_year_tables(html: &str, station: &str) -> Result<Vec<YearTable>, ScrapeError> {
    let mut years = Vec::new();
    let mut seen_table = false;
    for table in tag_blocks(html, "table") {
        if !class_contains(table.attrs, DATA_TABLE_CLASS) {
            continue;
        }
        seen_table = true;
        for row in tag_blocks(table.inner, "tr") {
            let cells = cell_texts(row.inner);
            if cells.is_empty() || cells[0] == YEAR_HEADER_LABEL {
                continue;
            }
            if cells.len() != CELLS_PER_YEAR_ROW {
                return Err(ScrapeError::TableShape {
                    station: station.to_string(),
                    year: cells[0].clone(),
                    expected: CELLS_PER_YEAR_ROW,
                    found: cells.len(),
                });
            }
            let year = cells[0].parse::<i32>().map_err(|_| ScrapeError::YearParse {
                station: station.to_string(),
                cell: cells[0].clone(),
            })?;
            debug!("Scraping year {year} for station {station}");
            years.push(YearTable {
                year,
                values: cells[1..=MONTHS_PER_YEAR].to_vec(),
            });
        }
    }
    if !seen_table {
        return Err(ScrapeError::NoYearTables {
            station: station.to_string(),
        });
    }
    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_row(year: &str, values: &[&str], annual: &str) -> String {
        let mut row = format!("<tr><td>{year}</td>");
        for value in values {
            row.push_str(&format!("<td>{value}</td>"));
        }
        row.push_str(&format!("<td>{annual}</td></tr>"));
        row
    }

    fn header_row() -> String {
        let mut row = "<tr><th>Year</th>".to_string();
        for month in [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ] {
            row.push_str(&format!("<th>{month}</th>"));
        }
        row.push_str("<th>Annual</th></tr>");
        row
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><table class=\"data2_s\">{}</table></body></html>",
            rows.concat()
        )
    }

    fn twelve() -> Vec<String> {
        (1..=12).map(|m| format!("{m}.0")).collect()
    }

    #[test]
    fn parses_year_rows_and_skips_header() {
        let values = twelve();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let html = page(&[header_row(), year_row("1991", &refs, "6.5")]);
        let years = parse_year_tables(&html, "WAKKANAI").unwrap();
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].year, 1991);
        assert_eq!(years[0].values, values);
    }

    #[test]
    fn trailing_annual_cell_is_excluded() {
        let values = twelve();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let html = page(&[year_row("1991", &refs, "6.5")]);
        let years = parse_year_tables(&html, "WAKKANAI").unwrap();
        assert_eq!(years[0].values.len(), MONTHS_PER_YEAR);
        assert!(!years[0].values.contains(&"6.5".to_string()));
    }

    #[test]
    fn multiple_years_stay_in_page_order() {
        let values = twelve();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let html = page(&[
            header_row(),
            year_row("1991", &refs, "6.5"),
            year_row("1992", &refs, "6.7"),
        ]);
        let years = parse_year_tables(&html, "WAKKANAI").unwrap();
        assert_eq!(
            years.iter().map(|y| y.year).collect::<Vec<_>>(),
            [1991, 1992]
        );
    }

    #[test]
    fn short_row_is_a_shape_error() {
        let html = page(&[year_row("1991", &["1.0", "2.0", "3.0"], "2.0")]);
        let err = parse_year_tables(&html, "WAKKANAI").unwrap_err();
        assert!(err.is_structural());
        match err {
            ScrapeError::TableShape {
                expected, found, ..
            } => {
                assert_eq!(expected, 14);
                assert_eq!(found, 5);
            }
            other => panic!("expected TableShape, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_year_is_an_error() {
        let values = twelve();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let html = page(&[year_row("19XX", &refs, "6.5")]);
        let err = parse_year_tables(&html, "WAKKANAI").unwrap_err();
        assert!(matches!(err, ScrapeError::YearParse { .. }));
        assert!(err.is_structural());
    }

    #[test]
    fn page_without_data_tables_is_an_error() {
        let html = "<html><body><table class=\"nav\"><tr><td>x</td></tr></table></body></html>";
        let err = parse_year_tables(html, "WAKKANAI").unwrap_err();
        assert!(matches!(err, ScrapeError::NoYearTables { .. }));
    }

    #[test]
    fn non_data_tables_are_ignored() {
        let values = twelve();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let html = format!(
            "<table class=\"nav\"><tr><td>menu</td></tr></table>{}",
            page(&[year_row("1991", &refs, "6.5")])
        );
        let years = parse_year_tables(&html, "WAKKANAI").unwrap();
        assert_eq!(years.len(), 1);
    }

    #[test]
    fn empty_data_table_yields_no_years() {
        let html = page(&[header_row()]);
        let years = parse_year_tables(&html, "WAKKANAI").unwrap();
        assert!(years.is_empty());
    }
}
