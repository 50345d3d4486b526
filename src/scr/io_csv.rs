// Primitives for reading and writing CSV files.

use std::collections::HashSet;
use std::path::Path;

use crate::scr::{
    io_common::{company_file_stem, unique_name},
    *,
};

/// Loads a CSV file as the only sheet of a workbook, under the name `sheet_name`.
pub fn read_csv_sheet(path: &str, sheet_name: &str) -> ScrResult<MemoryWorkbook> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let row: Vec<CellValue> = line
            .iter()
            .map(|s| {
                if s.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(s.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    debug!("read_csv_sheet: {:?}: {} rows", path, rows.len());
    let mut book = MemoryWorkbook::new();
    book.add_sheet(sheet_name, rows);
    Ok(book)
}

/// Writes one `<company>.csv` file per company in the directory `dir`.
///
/// Companies whose file names only differ by case get a ` (2)`, ` (3)`... suffix,
/// since some file systems do not tell them apart.
pub fn write_company_sheets(book: &MemoryWorkbook, summary: &RunSummary, dir: &str) -> ScrResult<()> {
    fs::create_dir_all(dir).context(WritingFileSnafu { path: dir })?;
    let mut used: HashSet<String> = HashSet::new();
    for report in summary.companies.iter() {
        let sheet = match book.sheet(&report.company) {
            Some(s) => s,
            None => whatever!("No sheet was written for company {:?}", report.company),
        };
        let stem = unique_name(&company_file_stem(&report.company), &mut used, usize::MAX);
        if stem != report.company {
            warn!("Company {:?} is written to {:?}.csv", report.company, stem);
        }
        let file_path = Path::new(dir)
            .join(format!("{}.csv", stem))
            .display()
            .to_string();
        let mut wtr = csv::Writer::from_path(&file_path).context(CsvWriteSnafu {
            path: file_path.clone(),
        })?;
        let width = sheet.width();
        for row in sheet.rows().iter() {
            let mut record: Vec<String> = row.iter().map(|c| c.as_text()).collect();
            record.resize(width, String::new());
            wtr.write_record(&record).context(CsvWriteSnafu {
                path: file_path.clone(),
            })?;
        }
        wtr.flush().context(WritingFileSnafu {
            path: file_path.clone(),
        })?;
        debug!("write_company_sheets: {:?} written", file_path);
    }
    info!(
        "{} company sheet(s) written to {:?}",
        summary.companies.len(),
        dir
    );
    Ok(())
}
