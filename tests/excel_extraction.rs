use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use nth_min::extraction::extract_first_column;
use nth_min::ErrorKind;
use rust_xlsxwriter::{Formula, Workbook};

fn tmp_file(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("nth-min-{name}-{nanos}.{ext}"))
}

#[test]
fn skips_text_and_empty_cells_in_row_order() {
    let path = tmp_file("mixed", "xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_number(0, 0, 5).unwrap();
    ws.write_string(1, 0, "x").unwrap();
    ws.write_string(2, 0, "").unwrap();
    ws.write_number(3, 0, 2).unwrap();
    ws.write_number(4, 0, 7).unwrap();
    wb.save(&path).unwrap();

    assert_eq!(extract_first_column(&path).unwrap(), vec![5, 2, 7]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn truncates_fractions_toward_zero() {
    let path = tmp_file("fractions", "xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_number(0, 0, 3.9).unwrap();
    ws.write_number(1, 0, -3.9).unwrap();
    ws.write_number(2, 0, 10.0).unwrap();
    wb.save(&path).unwrap();

    assert_eq!(extract_first_column(&path).unwrap(), vec![3, -3, 10]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn skips_booleans_gaps_and_other_columns() {
    let path = tmp_file("gaps", "xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "header").unwrap();
    ws.write_number(0, 1, 1000).unwrap();
    ws.write_boolean(1, 0, true).unwrap();
    ws.write_number(3, 0, 11).unwrap();
    // Row 5 only has a value in column B.
    ws.write_number(5, 1, 999).unwrap();
    ws.write_number(9, 0, -4).unwrap();
    wb.save(&path).unwrap();

    assert_eq!(extract_first_column(&path).unwrap(), vec![11, -4]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn only_the_first_sheet_is_read() {
    let path = tmp_file("two-sheets", "xlsx");
    let mut wb = Workbook::new();
    let first = wb.add_worksheet();
    first.set_name("First").unwrap();
    first.write_number(0, 0, 1).unwrap();
    let second = wb.add_worksheet();
    second.set_name("Second").unwrap();
    second.write_number(0, 0, 2).unwrap();
    second.write_number(1, 0, 3).unwrap();
    wb.save(&path).unwrap();

    assert_eq!(extract_first_column(&path).unwrap(), vec![1]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn formula_cells_are_skipped_with_or_without_cached_result() {
    let path = tmp_file("formulas", "xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_number(0, 0, 5).unwrap();
    ws.write_formula(1, 0, Formula::new("=A1*2").set_result("10"))
        .unwrap();
    ws.write_formula(2, 0, "=A1+1").unwrap();
    ws.write_number(3, 0, 8).unwrap();
    // A formula in another column must not hide the literal in column A.
    ws.write_formula(3, 1, "=A4*3").unwrap();
    wb.save(&path).unwrap();

    assert_eq!(extract_first_column(&path).unwrap(), vec![5, 8]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_first_column_yields_no_values() {
    let path = tmp_file("col-b-only", "xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_number(0, 1, 4).unwrap();
    ws.write_number(1, 1, 5).unwrap();
    wb.save(&path).unwrap();

    assert!(extract_first_column(&path).unwrap().is_empty());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn repeated_extraction_is_deterministic() {
    let path = tmp_file("repeat", "xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (row, v) in [8, -1, 8, 3, 0, 42].into_iter().enumerate() {
        ws.write_number(row as u32, 0, v).unwrap();
    }
    wb.save(&path).unwrap();

    let a = extract_first_column(&path).unwrap();
    let b = extract_first_column(&path).unwrap();
    assert_eq!(a, vec![8, -1, 8, 3, 0, 42]);
    assert_eq!(a, b);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn format_is_detected_from_content_not_extension() {
    let path = tmp_file("renamed", "bin");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_number(0, 0, 6).unwrap();
    wb.save(&path).unwrap();

    assert_eq!(extract_first_column(&path).unwrap(), vec![6]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_not_found() {
    let path = tmp_file("does-not-exist", "xlsx");
    let err = extract_first_column(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn directory_is_not_found() {
    let err = extract_first_column(std::env::temp_dir()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn corrupt_file_is_read_error() {
    let path = tmp_file("corrupt", "xlsx");
    std::fs::write(&path, b"this is not a spreadsheet at all").unwrap();

    let err = extract_first_column(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadError);
    let _ = std::fs::remove_file(&path);
}
