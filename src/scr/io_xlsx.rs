// Reading and writing Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

use std::collections::HashSet;

use crate::scr::{
    io_common::{simplify_file_name, unique_name},
    *,
};

fn to_cell(data: &DataType) -> CellValue {
    match data {
        DataType::Empty => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::DateTime(f) => CellValue::Number(*f),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Reads every worksheet of the file. Cells are placed at their position in
/// the sheet, so that a range starting at B3 keeps its first two rows and its first column empty.
pub fn read_workbook(path: &str) -> ScrResult<MemoryWorkbook> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_owned();
    debug!("read_workbook: {:?}: sheets {:?}", path, sheet_names);

    let mut book = MemoryWorkbook::new();
    for name in sheet_names.iter() {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet: name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;
        let (row_offset, col_offset) = match wrange.start() {
            Some((r, c)) => (r as usize, c as usize),
            None => (0, 0),
        };
        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
        for row in wrange.rows() {
            let mut cells: Vec<CellValue> = vec![CellValue::Empty; col_offset];
            cells.extend(row.iter().map(to_cell));
            rows.push(cells);
        }
        debug!("read_workbook: sheet {:?}: {} rows", name, rows.len());
        book.add_sheet(name, rows);
    }
    info!(
        "Read {} worksheet(s) from {:?}",
        book.sheets().len(),
        simplify_file_name(path)
    );
    Ok(book)
}

/// Excel limits sheet names to 31 characters and forbids a few of them.
fn xlsx_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(31)
        .collect();
    let cleaned = cleaned.trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Writes all the sheets of the book, response sheets included.
///
/// Excel compares sheet names without case, so sheets whose names only differ
/// by case (or after cleaning) get a ` (2)`, ` (3)`... suffix.
pub fn write_workbook(book: &MemoryWorkbook, path: &str) -> ScrResult<()> {
    let mut workbook = XlsxWorkbook::new();
    let mut used: HashSet<String> = HashSet::new();
    for sheet in book.sheets() {
        let name = unique_name(&xlsx_sheet_name(&sheet.name), &mut used, 31);
        if name != sheet.name {
            warn!("Sheet {:?} is written as {:?}", sheet.name, name);
        }
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(name)
            .context(WritingExcelSnafu { path })?;
        for (r, row) in sheet.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(s) => {
                        worksheet
                            .write_string(r as u32, c as u16, s)
                            .context(WritingExcelSnafu { path })?;
                    }
                    CellValue::Number(x) => {
                        worksheet
                            .write_number(r as u32, c as u16, *x)
                            .context(WritingExcelSnafu { path })?;
                    }
                }
            }
        }
    }
    workbook.save(path).context(WritingExcelSnafu { path })?;
    info!("Company sheets written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_fit_excel() {
        assert_eq!(xlsx_sheet_name("Acme"), "Acme");
        assert_eq!(xlsx_sheet_name("A/B [x]"), "A_B _x_");
        assert_eq!(xlsx_sheet_name(&"x".repeat(40)).len(), 31);
        assert_eq!(xlsx_sheet_name("''"), "_");
    }

    #[test]
    fn calamine_cells() {
        assert_eq!(to_cell(&DataType::Empty), CellValue::Empty);
        assert_eq!(to_cell(&DataType::Int(3)), CellValue::Number(3.0));
        assert_eq!(
            to_cell(&DataType::String("Acme".to_string())),
            CellValue::Text("Acme".to_string())
        );
    }

    #[test]
    fn xlsx_round_trip() {
        let dir = std::env::temp_dir().join(format!("surveyscore-xlsx-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("book.xlsx").display().to_string();

        let mut book = MemoryWorkbook::new();
        book.add_sheet(
            "Acme",
            vec![
                vec!["Опросник".into(), "S".into()],
                vec![CellValue::Empty, 12.5.into()],
            ],
        );
        write_workbook(&book, &path).unwrap();
        let read = read_workbook(&path).unwrap();
        let sheet = read.sheet("Acme").unwrap();
        assert_eq!(sheet.cell(1, 1), CellValue::Text("Опросник".to_string()));
        assert_eq!(sheet.cell(2, 2), CellValue::Number(12.5));
        assert_eq!(sheet.cell(2, 1), CellValue::Empty);
    }

    #[test]
    fn sheets_differing_by_case_are_all_written() {
        let dir = std::env::temp_dir().join(format!("surveyscore-xlsx-case-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("book.xlsx").display().to_string();

        let mut book = MemoryWorkbook::new();
        book.add_sheet("Acme", vec![vec![CellValue::from("upper")]]);
        book.add_sheet("acme", vec![vec![CellValue::from("lower")]]);
        write_workbook(&book, &path).unwrap();

        let read = read_workbook(&path).unwrap();
        assert_eq!(read.sheet("Acme").unwrap().cell(1, 1), CellValue::from("upper"));
        assert_eq!(
            read.sheet("acme (2)").unwrap().cell(1, 1),
            CellValue::from("lower")
        );
    }
}
