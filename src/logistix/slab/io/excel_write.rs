use std::path::Path;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use crate::logistix::slab::error::Result;
use crate::logistix::slab::model::{CellValue, Workbook};

/// Number format applied to date cells so they read back as dates.
pub const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes every sheet of `workbook` to `path`, values only.
pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    let mut workbook_writer = XlsxWorkbook::new();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    for sheet in &workbook.sheets {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row_idx, row) in sheet.raw_rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(value) => {
                        worksheet.write_string(row_idx, col_idx, value)?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(row_idx, col_idx, *value)?;
                    }
                    CellValue::DateTime(value) => {
                        worksheet.write_number_with_format(
                            row_idx,
                            col_idx,
                            *value,
                            &date_format,
                        )?;
                    }
                    CellValue::Bool(value) => {
                        worksheet.write_boolean(row_idx, col_idx, *value)?;
                    }
                }
            }
        }
    }

    workbook_writer.save(path)?;
    Ok(())
}
