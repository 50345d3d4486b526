use log::debug;

use crate::config::*;

/// Opaque reference to a sheet of a workbook.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct SheetHandle(pub usize);

/// The storage the scoring run reads from and writes to.
///
/// Rows and columns are 1-based, as in spreadsheet applications.
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;

    /// Returns the sheet called `name`, creating an empty one if needed.
    fn get_or_create_sheet(&mut self, name: &str) -> SheetHandle;

    /// Removes all the content of a sheet.
    fn clear_sheet(&mut self, sheet: SheetHandle);

    /// The cells of one row. Rows past the end of the data are empty.
    fn read_row(&self, sheet_name: &str, row: usize) -> Result<Vec<CellValue>, ScoringError>;

    /// Writes a rectangular block with its top left corner at (`top_row`, `left_col`).
    fn write_grid(
        &mut self,
        sheet: SheetHandle,
        top_row: usize,
        left_col: usize,
        grid: &[Vec<CellValue>],
    ) -> Result<(), ScoringError>;
}

#[derive(PartialEq, Debug, Clone)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: &str, rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet {
            name: name.to_string(),
            rows,
        }
    }

    /// All the rows, up to the last one holding a value.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// The value at a 1-based position.
    pub fn cell(&self, row: usize, col: usize) -> CellValue {
        self.rows
            .get(row.wrapping_sub(1))
            .and_then(|r| r.get(col.wrapping_sub(1)))
            .cloned()
            .unwrap_or_default()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

/// A workbook held entirely in memory.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> MemoryWorkbook {
        MemoryWorkbook { sheets: Vec::new() }
    }

    /// Adds a sheet, or replaces the content of the sheet with the same name.
    pub fn add_sheet(&mut self, name: &str, rows: Vec<Vec<CellValue>>) {
        let handle = self.get_or_create_sheet(name);
        self.sheets[handle.0].rows = rows;
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn get_or_create_sheet(&mut self, name: &str) -> SheetHandle {
        if let Some(pos) = self.sheets.iter().position(|s| s.name == name) {
            return SheetHandle(pos);
        }
        debug!("get_or_create_sheet: creating sheet {:?}", name);
        self.sheets.push(Sheet::new(name, Vec::new()));
        SheetHandle(self.sheets.len() - 1)
    }

    fn clear_sheet(&mut self, sheet: SheetHandle) {
        if let Some(s) = self.sheets.get_mut(sheet.0) {
            s.rows.clear();
        }
    }

    fn read_row(&self, sheet_name: &str, row: usize) -> Result<Vec<CellValue>, ScoringError> {
        let sheet = self
            .sheet(sheet_name)
            .ok_or_else(|| ScoringError::MissingSource {
                sheet: sheet_name.to_string(),
            })?;
        Ok(sheet
            .rows
            .get(row.wrapping_sub(1))
            .cloned()
            .unwrap_or_default())
    }

    fn write_grid(
        &mut self,
        sheet: SheetHandle,
        top_row: usize,
        left_col: usize,
        grid: &[Vec<CellValue>],
    ) -> Result<(), ScoringError> {
        if top_row == 0 || left_col == 0 {
            return Err(ScoringError::InvalidPosition {
                row: top_row,
                col: left_col,
            });
        }
        let s = self
            .sheets
            .get_mut(sheet.0)
            .ok_or(ScoringError::UnknownSheet { handle: sheet.0 })?;
        for (r, values) in grid.iter().enumerate() {
            let row_idx = top_row - 1 + r;
            if s.rows.len() <= row_idx {
                s.rows.resize(row_idx + 1, Vec::new());
            }
            let row = &mut s.rows[row_idx];
            let needed = left_col - 1 + values.len();
            if row.len() < needed {
                row.resize(needed, CellValue::Empty);
            }
            for (c, value) in values.iter().enumerate() {
                row[left_col - 1 + c] = value.clone();
            }
        }
        Ok(())
    }
}
