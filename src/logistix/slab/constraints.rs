use std::collections::BTreeSet;

use tracing::{debug, info, instrument};

use crate::logistix::slab::error::Result;
use crate::logistix::slab::model::{SheetRef, SlabTag, Workbook};
use crate::logistix::slab::scan::{self, Row};
use crate::logistix::slab::text::extract_first_integer;

/// Sheet listing the slab constraints of the project.
pub const CONSTRAINTS_SHEET: &str = "Custom Constraints";
/// 1-based column holding the constraint label.
pub const LABEL_COLUMN: usize = 1;
/// 1-based column holding the linear-expression reference.
pub const REFERENCE_COLUMN: usize = 3;

/// Linear-expression keys whose rows may receive a computed price.
pub type EligibleKeys = BTreeSet<i64>;

/// One tagged constraint row with a usable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintEntry {
    pub label: String,
    pub tag: SlabTag,
    pub linear_expression_key: i64,
}

/// Reads the constraints sheet of the project workbook and returns the keys
/// referenced by slab-tagged rows. The sheet must exist.
#[instrument(level = "debug", skip_all)]
pub fn eligible_keys(project: &Workbook) -> Result<EligibleKeys> {
    let rows = scan::scan(project, &SheetRef::name(CONSTRAINTS_SHEET), 0)?;
    let keys: EligibleKeys = constraint_entries(rows)
        .map(|entry| entry.linear_expression_key)
        .collect();
    info!(keys = ?keys, "collected linear expression keys");
    Ok(keys)
}

/// Yields an entry for every row whose label carries a slab tag and whose
/// reference cell contains a digit run. Other rows are ignored.
pub fn constraint_entries<'a>(
    rows: impl IntoIterator<Item = Row<'a>>,
) -> impl Iterator<Item = ConstraintEntry> {
    rows.into_iter().filter_map(|row| {
        let label = row.text(LABEL_COLUMN);
        let tag = SlabTag::ALL
            .into_iter()
            .find(|tag| label.contains(tag.constraint_label()))?;

        let reference = row.text(REFERENCE_COLUMN);
        let Some(key) = extract_first_integer(&reference) else {
            debug!(row = row.number(), %reference, "tagged constraint without numeric reference");
            return None;
        };

        info!(row = row.number(), %tag, key, "added linear expression key");
        Some(ConstraintEntry {
            label: label.into_owned(),
            tag,
            linear_expression_key: key,
        })
    })
}
