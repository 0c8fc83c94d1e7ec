use std::borrow::Cow;

use crate::logistix::slab::error::Result;
use crate::logistix::slab::model::{CellValue, Sheet, SheetRef, Workbook};

static EMPTY: CellValue = CellValue::Empty;

/// A borrowed view of one non-empty worksheet row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    cells: &'a [CellValue],
}

impl<'a> Row<'a> {
    /// 0-based position of the row in the sheet.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Spreadsheet row number (1-based), for diagnostics.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Returns the cell in the given 1-based column; blank when out of range.
    pub fn cell(&self, column: usize) -> &'a CellValue {
        column
            .checked_sub(1)
            .and_then(|col| self.cells.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn text(&self, column: usize) -> Cow<'a, str> {
        self.cell(column).as_text()
    }
}

/// Walks the rows of `sheet` that hold at least one value, in document order,
/// after dropping the first `skip` of them.
pub fn rows_used(sheet: &Sheet, skip: usize) -> impl Iterator<Item = Row<'_>> {
    sheet
        .raw_rows()
        .iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|cell| !cell.is_empty()))
        .map(|(index, cells)| Row { index, cells })
        .skip(skip)
}

/// Resolves `reference` in `workbook` and walks its used rows.
pub fn scan<'a>(
    workbook: &'a Workbook,
    reference: &SheetRef,
    skip: usize,
) -> Result<impl Iterator<Item = Row<'a>> + use<'a>> {
    let sheet = workbook.sheet(reference)?;
    Ok(rows_used(sheet, skip))
}
