use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::logistix::slab::error::{Result, ToolError};
use crate::logistix::slab::model::{CellValue, Sheet, SheetRef, Workbook};

/// Loads every sheet of an `.xlsx` file into memory. The file handle is
/// released before this returns.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let names: Vec<String> = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = read_required_sheet(&mut workbook, &name)?;
        let sheet = range_to_sheet(name, &range);
        debug!(sheet = %sheet.name, rows = sheet.row_count(), "loaded sheet");
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::SheetNotFound(SheetRef::name(name)))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn range_to_sheet(name: String, range: &calamine::Range<DataType>) -> Sheet {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut sheet = Sheet::new(name);

    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let value = cell_to_value(cell);
            if value.is_empty() {
                continue;
            }
            sheet.set_cell(
                start_row as usize + row_idx,
                start_col as usize + col_idx,
                value,
            );
        }
    }

    sheet
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::DateTime(value) => CellValue::DateTime(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}
