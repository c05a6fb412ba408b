//! Spreadsheet extraction.
//!
//! [`extract_first_column`] opens a workbook, reads the first column of its first sheet and
//! returns the literal numeric cells as integers in row order. Formula cells and cells that are
//! not tagged numeric are skipped rather than reported; only a missing/unreadable file or an undecodable workbook is an
//! error.
//!
//! [`column_values`] applies the same cell policy to a sheet and its formulas already in memory.

pub mod excel;

pub use excel::{column_values, extract_first_column};
