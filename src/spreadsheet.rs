//! Roster and results workbook I/O.
//!
//! Rosters are single-sheet .xlsx workbooks with a header row; a column
//! labeled `Name` holds the names, falling back to the first column when no
//! such label exists. Results are written as a three-column table: picked
//! names in pick order, the export timestamp repeated per row, and whatever
//! names remain unpicked.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::Local;
use rust_xlsxwriter::Workbook;

use crate::error::{SpreadsheetError, SpreadsheetResult};

/// Header label of the roster column
pub const NAME_HEADER: &str = "Name";

/// Read a roster workbook. The first row is treated as a header row; a cell
/// equal to [`NAME_HEADER`] selects the roster column, otherwise the first
/// column is used. Blank cells are skipped and numeric cells stringified.
/// An empty result is not an error here; explicit imports go through
/// [`import_roster`].
pub fn load_roster(path: &Path) -> SpreadsheetResult<Vec<String>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SpreadsheetError::Workbook(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoSheet)?
        .map_err(|e| SpreadsheetError::Workbook(e.to_string()))?;

    let rows: Vec<&[Data]> = range.rows().collect();
    let column = rows
        .first()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == NAME_HEADER))
        })
        .unwrap_or(0);

    let names = rows
        .iter()
        .skip(1)
        .filter_map(|row| row.get(column).and_then(cell_text))
        .collect();

    Ok(names)
}

/// Read a roster for an explicit import. Unlike the initial load, a workbook
/// that yields zero names is rejected so the caller can leave its current
/// state untouched.
pub fn import_roster(path: &Path) -> SpreadsheetResult<Vec<String>> {
    let names = load_roster(path)?;
    if names.is_empty() {
        return Err(SpreadsheetError::EmptyRoster);
    }
    Ok(names)
}

/// Write the roster as a single-column table, overwriting `path`.
pub fn save_roster(path: &Path, names: &[String]) -> SpreadsheetResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write(0, 0, NAME_HEADER)?;
    for (i, name) in names.iter().enumerate() {
        sheet.write(i as u32 + 1, 0, name.as_str())?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Write a results table: picked names in pick order, the export timestamp
/// repeated per row, and the remaining unpicked names. Rejected before any
/// file I/O when nothing has been picked.
pub fn export_results(
    path: &Path,
    picked: &[String],
    remaining: &[String],
) -> SpreadsheetResult<()> {
    if picked.is_empty() {
        return Err(SpreadsheetError::NothingPicked);
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write(0, 0, "Picked")?;
    sheet.write(0, 1, "Time")?;
    for (i, name) in picked.iter().enumerate() {
        sheet.write(i as u32 + 1, 0, name.as_str())?;
        sheet.write(i as u32 + 1, 1, timestamp.as_str())?;
    }

    if !remaining.is_empty() {
        sheet.write(0, 2, "Remaining")?;
        for (i, name) in remaining.iter().enumerate() {
            sheet.write(i as u32 + 1, 2, name.as_str())?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Timestamped default filename offered in the export prompt.
pub fn default_export_filename() -> String {
    format!("picks_{}.xlsx", Local::now().format("%Y%m%d_%H%M%S"))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
