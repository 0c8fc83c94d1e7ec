use tracing::{debug, instrument, trace};

use crate::logistix::slab::config::ExcelSettings;
use crate::logistix::slab::error::Result;
use crate::logistix::slab::model::{PriceSample, Workbook};
use crate::logistix::slab::scan::{self, Row};
use crate::logistix::slab::text::parse_price;

/// Pulls every parseable price from the configured sheet of the price list.
///
/// Rows are ignored until one whose first cell contains `search_string`
/// shows up; from that row on (inclusive) each parseable price cell yields a
/// sample. A marker that never appears produces an empty list, not an error.
#[instrument(
    level = "debug",
    skip_all,
    fields(sheet = settings.sheet_number, column = settings.price_column)
)]
pub fn extract_prices(workbook: &Workbook, settings: &ExcelSettings) -> Result<Vec<PriceSample>> {
    let rows = scan::scan(workbook, &settings.sheet(), settings.skip_rows)?;
    let samples = collect_samples(rows, settings.price_column, &settings.search_string);
    debug!(sample_count = samples.len(), "extracted price samples");
    Ok(samples)
}

/// Marker-gated extraction over an arbitrary row sequence.
pub fn collect_samples<'a>(
    rows: impl IntoIterator<Item = Row<'a>>,
    price_column: usize,
    search_string: &str,
) -> Vec<PriceSample> {
    let mut active = false;
    let mut samples = Vec::new();

    for row in rows {
        if !active && row.text(1).contains(search_string) {
            debug!(row = row.number(), "found marker row");
            active = true;
        }
        if !active {
            continue;
        }

        match parse_price(row.cell(price_column), price_column) {
            Ok(value) => samples.push(PriceSample::new(value)),
            Err(error) => trace!(row = row.number(), %error, "skipping row"),
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logistix::slab::error::ToolError;
    use crate::logistix::slab::model::{CellValue, Sheet};

    fn settings(search: &str, skip_rows: usize) -> ExcelSettings {
        ExcelSettings {
            sheet_number: 1,
            price_column: 2,
            skip_rows,
            search_string: search.to_string(),
        }
    }

    fn workbook(rows: Vec<Vec<CellValue>>) -> Workbook {
        Workbook::new(vec![Sheet::from_rows("Prices", rows)])
    }

    fn values(samples: &[PriceSample]) -> Vec<f64> {
        samples.iter().map(|sample| sample.value).collect()
    }

    #[test]
    fn marker_row_is_included() {
        let book = workbook(vec![
            vec!["foo".into(), 1.0.into()],
            vec!["MARKER".into(), 5.0.into()],
            vec!["x".into(), 10.0.into()],
        ]);
        let samples = extract_prices(&book, &settings("MARKER", 0)).expect("extracted");
        assert_eq!(values(&samples), vec![5.0, 10.0]);
    }

    #[test]
    fn marker_matches_as_substring() {
        let book = workbook(vec![
            vec!["Прайс".into(), "цена".into()],
            vec!["Лист г/к 10 мм".into(), "58 900".into()],
            vec!["Лист г/к 12 мм".into(), "договорная".into()],
            vec!["Лист г/к 14 мм".into(), "61 100".into()],
        ]);
        let samples = extract_prices(&book, &settings("г/к", 0)).expect("extracted");
        assert_eq!(values(&samples), vec![58900.0, 61100.0]);
    }

    #[test]
    fn missing_marker_yields_no_samples() {
        let book = workbook(vec![
            vec!["foo".into(), 1.0.into()],
            vec!["bar".into(), 2.0.into()],
        ]);
        let samples = extract_prices(&book, &settings("MARKER", 0)).expect("extracted");
        assert!(samples.is_empty());
    }

    #[test]
    fn skipped_rows_cannot_trigger_marker() {
        let book = workbook(vec![
            vec!["MARKER".into(), 1.0.into()],
            vec!["x".into(), 2.0.into()],
        ]);
        let samples = extract_prices(&book, &settings("MARKER", 1)).expect("extracted");
        assert!(samples.is_empty());
    }

    #[test]
    fn marker_row_without_price_still_activates() {
        let book = workbook(vec![
            vec![CellValue::from("MARKER")],
            vec!["x".into(), "1 000".into()],
        ]);
        let samples = extract_prices(&book, &settings("MARKER", 0)).expect("extracted");
        assert_eq!(values(&samples), vec![1000.0]);
    }

    #[test]
    fn missing_sheet_is_structural() {
        let book = workbook(vec![vec!["MARKER".into(), 1.0.into()]]);
        let mut settings = settings("MARKER", 0);
        settings.sheet_number = 3;
        assert!(matches!(
            extract_prices(&book, &settings),
            Err(ToolError::SheetNotFound(_))
        ));
    }
}
