//! Small text helpers shared by the price extractor, the constraint matcher
//! and the reconciliation pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::logistix::slab::error::{Result, ToolError};
use crate::logistix::slab::model::CellValue;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").expect("valid regex"));

/// Returns the first run of ASCII digits in `text` as an integer.
///
/// Runs that overflow `i64` yield `None`, as does text without digits.
/// Signs are not recognised: `"ref -17"` produces `17`.
pub fn extract_first_integer(text: &str) -> Option<i64> {
    DIGIT_RUN
        .find(text)
        .and_then(|found| found.as_str().parse().ok())
}

/// Reads a price from a cell.
///
/// Numeric cells are taken as-is. Text cells have every whitespace character
/// (thousands grouping, including non-breaking spaces) removed; a lone comma
/// is then read as the decimal separator when no `.` is present.
/// `column` is 1-based and only used for the error.
pub fn parse_price(cell: &CellValue, column: usize) -> Result<f64> {
    let malformed = || ToolError::MalformedCell {
        column,
        value: cell.as_text().into_owned(),
    };

    let value = match cell {
        CellValue::Number(value) => *value,
        CellValue::Text(text) => {
            let mut compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            if !compact.contains('.') && compact.matches(',').count() == 1 {
                compact = compact.replace(',', ".");
            }
            compact.parse::<f64>().map_err(|_| malformed())?
        }
        CellValue::Empty | CellValue::Bool(_) | CellValue::DateTime(_) => {
            return Err(malformed());
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_integer_takes_leading_digit_run() {
        assert_eq!(extract_first_integer("ref 17"), Some(17));
        assert_eq!(extract_first_integer("Slab 42 of 99"), Some(42));
        assert_eq!(extract_first_integer("abc123def456"), Some(123));
        assert_eq!(extract_first_integer("007"), Some(7));
    }

    #[test]
    fn first_integer_missing_or_oversized() {
        assert_eq!(extract_first_integer("no digits here"), None);
        assert_eq!(extract_first_integer(""), None);
        assert_eq!(extract_first_integer("99999999999999999999999"), None);
    }

    #[test]
    fn price_strips_grouping_whitespace() {
        let cell = CellValue::from("12 345");
        assert_eq!(parse_price(&cell, 2).expect("parsed"), 12345.0);

        let cell = CellValue::from("1\u{a0}250.5");
        assert_eq!(parse_price(&cell, 2).expect("parsed"), 1250.5);
    }

    #[test]
    fn price_accepts_decimal_comma() {
        let cell = CellValue::from("12 345,67");
        assert_eq!(parse_price(&cell, 2).expect("parsed"), 12345.67);
    }

    #[test]
    fn price_passes_numbers_through() {
        assert_eq!(parse_price(&CellValue::Number(42.5), 3).expect("parsed"), 42.5);
    }

    #[test]
    fn price_rejects_noise() {
        for cell in [
            CellValue::Empty,
            CellValue::from(""),
            CellValue::from("договорная"),
            CellValue::from("1,2,3"),
            CellValue::from("NaN"),
            CellValue::Bool(true),
            CellValue::DateTime(45292.0),
        ] {
            match parse_price(&cell, 4) {
                Err(ToolError::MalformedCell { column, .. }) => assert_eq!(column, 4),
                other => panic!("expected malformed cell for {cell:?}, got {other:?}"),
            }
        }
    }
}
