#![allow(dead_code)]

use std::path::{Path, PathBuf};

use logistix_slab_sync::config::{ExcelSettings, PricingSettings, Settings};
use logistix_slab_sync::model::CellValue;
use rust_xlsxwriter::{Format, Workbook};

pub enum Fixture<'a> {
    Text(&'a str),
    Number(f64),
    /// Excel serial date, written with a date number format.
    Date(f64),
    Blank,
}

pub use Fixture::{Blank, Date, Number, Text};

/// Writes a workbook with one sheet per `(name, rows)` pair.
pub fn write_fixture(path: &Path, sheets: &[(&str, Vec<Vec<Fixture<'_>>>)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name accepted");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                match cell {
                    Fixture::Text(value) => {
                        worksheet
                            .write_string(row_idx, col_idx, *value)
                            .expect("string written");
                    }
                    Fixture::Number(value) => {
                        worksheet
                            .write_number(row_idx, col_idx, *value)
                            .expect("number written");
                    }
                    Fixture::Date(value) => {
                        worksheet
                            .write_number_with_format(row_idx, col_idx, *value, &date_format)
                            .expect("date written");
                    }
                    Fixture::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("fixture saved");
}

pub fn price_list(path: &Path) {
    write_fixture(
        path,
        &[(
            "Прайс",
            vec![
                vec![Text("Металлобаза"), Blank, Text("прайс-лист")],
                vec![Text("Наименование"), Text("Марка"), Text("Цена, руб/т")],
                vec![Text("Арматура А500С"), Text("Ст3"), Text("55 000")],
                vec![Text("Лист г/к 10 мм"), Text("Ст3"), Text("60 000")],
                vec![Text("Лист г/к 12 мм"), Text("Ст3"), Number(70_000.0)],
                vec![Text("Лист г/к 14 мм"), Text("Ст3"), Text("по запросу")],
            ],
        )],
    );
}

pub fn project(path: &Path) {
    write_fixture(
        path,
        &[
            (
                "Custom Constraints",
                vec![
                    vec![Text("Name"), Text("Type"), Text("Linear expression")],
                    vec![Text("Slab [·o51]"), Text("≤"), Text("LE 1")],
                    vec![Text("Slab [·o52]"), Text("≤"), Text("LE 2")],
                    vec![Text("Slab [·o53]"), Text("≤"), Text("n/a")],
                    vec![Text("Capacity"), Text("≤"), Text("LE 3")],
                ],
            ),
            (
                "Linear expressions",
                vec![
                    vec![Text("Expression"), Text("Variable"), Text("Coefficient"), Text("Tag")],
                    vec![Text("LE 1"), Text("flow"), Number(1.0), Text("Slab [·o51] cost")],
                    vec![Text("LE 2"), Text("flow"), Number(2.0), Text("Slab [·o52] cost")],
                    vec![Text("LE 3"), Text("flow"), Number(3.0), Text("Slab [·o53] cost")],
                    vec![Text("LE 2"), Text("flow"), Number(4.0), Text("untagged")],
                ],
            ),
            ("Notes", vec![vec![Text("keep me")]]),
            ("Periods", vec![vec![Date(45_292.0), Text("January 2024")]]),
        ],
    );
}

pub fn settings(project: PathBuf) -> Settings {
    Settings {
        download_url: None,
        project_file_path: project,
        exchange_rate_api_url: None,
        excel_settings: ExcelSettings {
            sheet_number: 1,
            price_column: 3,
            skip_rows: 1,
            search_string: "Лист г/к".to_string(),
        },
        pricing: PricingSettings::default(),
    }
}

pub fn number(value: f64) -> CellValue {
    CellValue::Number(value)
}
