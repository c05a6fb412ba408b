use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::{NthMinError, NthMinResult};

/// Extract the integers in the first column of the first sheet of a workbook.
///
/// Behavior:
/// - The whole file is read into memory and the format (`.xlsx`, `.xls`, `.xlsb`, `.ods`) is
///   detected from its content, not from the extension
/// - A workbook without sheets yields an empty `Vec`
/// - The sheet is read twice, once for cell values and once for formulas
/// - Rows are visited in document order; see [`column_values`] for which cells count
///
/// The file and the parsed workbook are dropped before this function returns, on success and on
/// failure alike.
///
/// # Errors
///
/// - [`NthMinError::NotFound`] if `path` cannot be opened or read
/// - [`NthMinError::ReadError`] if the bytes are not a spreadsheet calamine understands, or the
///   first sheet's values or formulas cannot be decoded
pub fn extract_first_column(path: impl AsRef<Path>) -> NthMinResult<Vec<i64>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| NthMinError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| read_error(path, e))?;

    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| read_error(path, e))?;
    let formulas = workbook
        .worksheet_formula(&sheet)
        .map_err(|e| read_error(path, e))?;

    Ok(column_values(&range, &formulas))
}

/// Collect the numeric values of column 0 of an already-parsed sheet, in row order.
///
/// `formulas` is the same sheet's formula range (`Reader::worksheet_formula`), used only to tell
/// formula cells apart from literal ones.
///
/// - Integer cells are taken as-is
/// - Float and date/time cells are truncated toward zero (`3.9 -> 3`, `-3.9 -> -3`)
/// - Formula cells are skipped whatever their cached result, as are text, boolean, error and empty
///   cells and rows with no column-0 cell
pub fn column_values(values: &Range<Data>, formulas: &Range<String>) -> Vec<i64> {
    // calamine trims leading empty columns, so a range that starts past column 0 has no
    // column-0 cells at all.
    let Some((first_row, 0)) = values.start() else {
        return Vec::new();
    };
    values
        .rows()
        .enumerate()
        .filter(|(idx, _)| !is_formula(formulas, first_row + *idx as u32))
        .filter_map(|(_, row)| row.first())
        .filter_map(numeric_cell_value)
        .collect()
}

fn is_formula(formulas: &Range<String>, row: u32) -> bool {
    formulas.get_value((row, 0)).is_some_and(|f| !f.is_empty())
}

fn numeric_cell_value(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(truncate(*f)),
        Data::DateTime(dt) => Some(truncate(dt.as_f64())),
        _ => None,
    }
}

// `as` truncates toward zero and saturates at the i64 bounds.
fn truncate(f: f64) -> i64 {
    f as i64
}

fn read_error(path: &Path, source: calamine::Error) -> NthMinError {
    NthMinError::ReadError {
        path: path.to_path_buf(),
        source,
    }
}
