use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::{Format, Formula, Workbook as XlsxWorkbook};
use std::path::Path;

use crate::excel::{CellValue, Sheet};

/// In-memory workbook: the ordered sheets of the source file. Mutated in
/// place by [`Workbook::keep_only`] and written out with
/// [`Workbook::save_as`].
pub struct Workbook {
    sheets: Vec<Sheet>,
}

/// Loads a workbook from `path`, reading every sheet eagerly.
///
/// Formula cells are read from the separate formula range so they can be
/// written back as formulas instead of their cached result text.
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path_str = path.as_ref().to_string_lossy().to_string();

    let mut workbook = open_workbook_auto(&path)
        .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .with_context(|| format!("Unable to read worksheet: {}", name))?;

        // The formula range is best-effort; xls files may not carry one.
        let formulas = workbook.worksheet_formula(name).ok();

        sheets.push(create_sheet(name, &range, formulas.as_ref()));
    }

    if sheets.is_empty() {
        anyhow::bail!("No worksheets found in file");
    }

    Ok(Workbook { sheets })
}

fn create_sheet(name: &str, range: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    // used_cells() positions are relative to the range start
    let (start_row, start_col) = range.start().unwrap_or_default();

    for (row, col, cell) in range.used_cells() {
        let value = match cell {
            Data::Empty => continue,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Error(e.to_string()),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::DateTimeIso(s.clone()),
            Data::DurationIso(s) => CellValue::DurationIso(s.clone()),
        };

        let row_idx = start_row + row as u32;
        let col_idx = (start_col as usize + col) as u16;
        sheet.cells.insert((row_idx, col_idx), value);
    }

    // Overlay formulas on top of the cached values
    if let Some(frm_range) = formulas {
        let (start_row, start_col) = frm_range.start().unwrap_or_default();

        for (row, col, formula) in frm_range.used_cells() {
            if formula.is_empty() {
                continue;
            }

            let row_idx = start_row + row as u32;
            let col_idx = (start_col as usize + col) as u16;
            sheet
                .cells
                .insert((row_idx, col_idx), CellValue::Formula(formula.clone()));
        }
    }

    sheet
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            names.push(sheet.name.clone());
        }
        names
    }

    /// Exact, case-sensitive membership test.
    pub fn contains_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Removes every sheet whose name is not `name`, leaving exactly one.
    pub fn keep_only(&mut self, name: &str) -> Result<()> {
        if !self.contains_sheet(name) {
            anyhow::bail!("Sheet '{}' not found in workbook", name);
        }

        self.sheets.retain(|s| s.name == name);
        Ok(())
    }

    /// Writes the current sheets to `path`, overwriting any existing file.
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = XlsxWorkbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet().set_name(&sheet.name)?;

            for (&(row, col), value) in &sheet.cells {
                match value {
                    CellValue::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    CellValue::DateTime(serial) => {
                        worksheet.write_number_with_format(row, col, *serial, &date_format)?;
                    }
                    CellValue::DateTimeIso(s) | CellValue::DurationIso(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    CellValue::Formula(f) => {
                        worksheet.write_formula(row, col, Formula::new(f))?;
                    }
                    CellValue::Error(e) => {
                        worksheet.write_string(row, col, e)?;
                    }
                }
            }
        }

        workbook
            .save(path.as_ref())
            .with_context(|| format!("Unable to save workbook: {}", path.as_ref().display()))?;

        Ok(())
    }
}
