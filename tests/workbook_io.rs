mod common;

use common::{Blank, Number, Text};
use logistix_slab_sync::io::{excel_read, excel_write};
use logistix_slab_sync::model::{CellValue, Sheet, SheetRef, Workbook};
use logistix_slab_sync::ToolError;
use tempfile::tempdir;

#[test]
fn cells_keep_their_absolute_positions() {
    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("offset.xlsx");
    common::write_fixture(
        &path,
        &[(
            "Data",
            vec![
                vec![],
                vec![],
                vec![Blank, Blank, Text("first"), Number(12.5)],
                vec![Blank, Blank, Blank, Text("12 000")],
            ],
        )],
    );

    let workbook = excel_read::read_workbook(&path).expect("workbook read");
    let sheet = workbook.sheet(&SheetRef::Index(1)).expect("first sheet");

    assert_eq!(sheet.name, "Data");
    assert_eq!(sheet.cell(2, 2), Some(&CellValue::from("first")));
    assert_eq!(sheet.cell(2, 3), Some(&CellValue::Number(12.5)));
    assert_eq!(sheet.cell(3, 3), Some(&CellValue::from("12 000")));
    assert_eq!(sheet.cell(0, 0), None);
}

#[test]
fn written_workbook_reads_back_identically() {
    let mut prices = Sheet::new("Prices");
    prices.set_cell(0, 0, CellValue::from("Лист г/к"));
    prices.set_cell(0, 1, CellValue::Number(61_250.0));
    prices.set_cell(1, 1, CellValue::Bool(true));
    prices.set_cell(2, 0, CellValue::DateTime(45_292.5));
    let mut notes = Sheet::new("Notes");
    notes.set_cell(4, 2, CellValue::from("tail"));
    let workbook = Workbook::new(vec![prices, notes]);

    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("roundtrip.xlsx");
    excel_write::write_workbook(&path, &workbook).expect("workbook written");
    let restored = excel_read::read_workbook(&path).expect("workbook read");

    assert_eq!(
        restored.sheets.iter().map(|sheet| sheet.name.as_str()).collect::<Vec<_>>(),
        vec!["Prices", "Notes"]
    );
    let prices = restored.sheet(&SheetRef::name("Prices")).expect("prices");
    assert_eq!(prices.cell(0, 0), Some(&CellValue::from("Лист г/к")));
    assert_eq!(prices.cell(0, 1), Some(&CellValue::Number(61_250.0)));
    assert_eq!(prices.cell(1, 1), Some(&CellValue::Bool(true)));
    assert_eq!(prices.cell(2, 0), Some(&CellValue::DateTime(45_292.5)));
    let notes = restored.sheet(&SheetRef::Index(2)).expect("notes");
    assert_eq!(notes.cell(4, 2), Some(&CellValue::from("tail")));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("absent.xlsx");
    assert!(matches!(
        excel_read::read_workbook(&path),
        Err(ToolError::MissingInput(_))
    ));
}
