use tracing::{info, instrument};

use crate::logistix::slab::constraints::EligibleKeys;
use crate::logistix::slab::error::Result;
use crate::logistix::slab::model::{AggregatePrice, CellValue, SheetRef, SlabTag, Workbook};
use crate::logistix::slab::scan;
use crate::logistix::slab::text::extract_first_integer;

/// Sheet holding the linear expressions whose values are rewritten.
pub const EXPRESSIONS_SHEET: &str = "Linear expressions";
/// Column A: expression identifier carrying the join key.
pub const KEY_COLUMN: usize = 1;
/// Column C: value overwritten with the computed price.
pub const VALUE_COLUMN: usize = 3;
/// Column D: text carrying the slab tag.
pub const TAG_COLUMN: usize = 4;

/// A single overwritten value cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    /// Spreadsheet row number (1-based).
    pub row: usize,
    pub key: i64,
    pub tag: SlabTag,
    pub previous: CellValue,
    pub value: i64,
}

/// Rewrites the value cell of every expression row whose key is eligible and
/// whose tag cell carries a slab marker. `o51` rows receive the foreign
/// price, `o52`/`o53` rows the local one.
///
/// The sheet is resolved before anything is written, so a missing sheet
/// leaves the workbook untouched. Running this twice with the same inputs
/// leaves the same values as running it once.
#[instrument(level = "debug", skip_all, fields(eligible = keys.len()))]
pub fn apply_prices(
    project: &mut Workbook,
    keys: &EligibleKeys,
    price: &AggregatePrice,
) -> Result<Vec<CellUpdate>> {
    let sheet = project.sheet(&SheetRef::name(EXPRESSIONS_SHEET))?;

    let planned: Vec<CellUpdate> = scan::rows_used(sheet, 0)
        .filter_map(|row| {
            let key = extract_first_integer(&row.text(KEY_COLUMN))?;
            if !keys.contains(&key) {
                return None;
            }
            let tag = SlabTag::find_marker(&row.text(TAG_COLUMN))?;
            Some(CellUpdate {
                row: row.number(),
                key,
                tag,
                previous: row.cell(VALUE_COLUMN).clone(),
                value: tag.price_for(price),
            })
        })
        .collect();

    let sheet = project.sheet_mut(&SheetRef::name(EXPRESSIONS_SHEET))?;
    for update in &planned {
        info!(
            row = update.row,
            tag = %update.tag,
            from = %update.previous,
            to = update.value,
            "updating value cell"
        );
        sheet.set_cell(update.row - 1, VALUE_COLUMN - 1, CellValue::from(update.value));
    }
    if !planned.is_empty() {
        project.mark_dirty();
    }

    Ok(planned)
}
