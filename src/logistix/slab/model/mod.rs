use std::borrow::Cow;
use std::fmt;

use crate::logistix::slab::error::{Result, ToolError};

/// A single spreadsheet cell value as seen by the pipeline. Formulas and
/// styles are not retained; dates keep their type.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Blank cell.
    #[default]
    Empty,
    /// Plain string content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Date or time as an Excel serial number. Kept apart from `Number` so
    /// the date format survives a save.
    DateTime(f64),
    /// Boolean content.
    Bool(bool),
}

impl CellValue {
    /// Renders the cell the way a spreadsheet would when asked for its text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(value) => Cow::Borrowed(value),
            CellValue::Number(value) | CellValue::DateTime(value) => Cow::Owned(value.to_string()),
            CellValue::Bool(value) => Cow::Owned(value.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Identifies a worksheet either by its exact name or by its 1-based
/// position in the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRef {
    Name(String),
    Index(usize),
}

impl SheetRef {
    pub fn name(name: impl Into<String>) -> Self {
        SheetRef::Name(name.into())
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Name(name) => write!(f, "'{name}'"),
            SheetRef::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// A worksheet held as a dense grid anchored at cell A1. Row and column
/// indices on this type are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Builds a sheet whose first row lands on spreadsheet row 1.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<C>>,
        C: Into<CellValue>,
    {
        Self {
            name: name.into(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn raw_rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Writes a value, growing the grid as needed.
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }
}

/// In-memory copy of a workbook. The source file is not kept open while the
/// pipeline works on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    dirty: bool,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets,
            dirty: false,
        }
    }

    pub fn sheet(&self, reference: &SheetRef) -> Result<&Sheet> {
        let position = self.position(reference)?;
        Ok(&self.sheets[position])
    }

    pub fn sheet_mut(&mut self, reference: &SheetRef) -> Result<&mut Sheet> {
        let position = self.position(reference)?;
        Ok(&mut self.sheets[position])
    }

    fn position(&self, reference: &SheetRef) -> Result<usize> {
        let found = match reference {
            SheetRef::Name(name) => self.sheets.iter().position(|sheet| &sheet.name == name),
            SheetRef::Index(index) => index
                .checked_sub(1)
                .filter(|position| *position < self.sheets.len()),
        };
        found.ok_or_else(|| ToolError::SheetNotFound(reference.clone()))
    }

    /// Flags the workbook as modified so the caller knows to persist it.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// One parsed price from the price list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    pub value: f64,
}

impl PriceSample {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

/// The representative price derived from the price list, in both currencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatePrice {
    /// Plain arithmetic mean of all samples.
    pub mean_local: f64,
    /// `mean_local * coefficient`.
    pub adjusted_local: f64,
    /// `adjusted_local / exchange_rate`.
    pub converted_foreign: f64,
    pub rounded_local: i64,
    pub rounded_foreign: i64,
}

/// Bracketed codes that route a computed price to a project row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlabTag {
    O51,
    O52,
    O53,
}

impl SlabTag {
    pub const ALL: [SlabTag; 3] = [SlabTag::O51, SlabTag::O52, SlabTag::O53];

    /// Marker text as it appears inside project cells.
    pub fn marker(self) -> &'static str {
        match self {
            SlabTag::O51 => "[·o51]",
            SlabTag::O52 => "[·o52]",
            SlabTag::O53 => "[·o53]",
        }
    }

    /// Label used for this tag on the constraints sheet.
    pub fn constraint_label(self) -> &'static str {
        match self {
            SlabTag::O51 => "Slab [·o51]",
            SlabTag::O52 => "Slab [·o52]",
            SlabTag::O53 => "Slab [·o53]",
        }
    }

    /// `o51` rows are priced in the foreign currency, the rest locally.
    pub fn price_for(self, price: &AggregatePrice) -> i64 {
        match self {
            SlabTag::O51 => price.rounded_foreign,
            SlabTag::O52 | SlabTag::O53 => price.rounded_local,
        }
    }

    /// Returns the first tag whose marker occurs in `text`, checking `o51`
    /// before the local-currency tags.
    pub fn find_marker(text: &str) -> Option<SlabTag> {
        SlabTag::ALL
            .into_iter()
            .find(|tag| text.contains(tag.marker()))
    }
}

impl fmt::Display for SlabTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
