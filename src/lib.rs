//! `nth-min` answers one question about a spreadsheet: what is the N-th smallest integer in the
//! first column of its first sheet?
//!
//! The work is split into two steps that compose in a straight line:
//!
//! 1. [`extraction::extract_first_column`] opens the workbook (`.xlsx`, `.xls`, `.xlsb`, `.ods`,
//!    detected from content), walks column 0 of the first sheet in row order and keeps the cells
//!    tagged numeric, truncated toward zero. Formula, text, boolean, error and empty cells are
//!    skipped.
//! 2. [`selection::select_nth_smallest`] validates the 1-based rank and runs an in-place
//!    quickselect (last-element pivot, Lomuto partition) on the extracted values.
//!
//! [`query::nth_min_from_path`] runs both steps and reports the outcome to an optional
//! [`query::QueryObserver`].
//!
//! ## Quick example
//!
//! ```no_run
//! use nth_min::query::{nth_min_from_path, QueryOptions};
//!
//! # fn main() -> Result<(), nth_min::NthMinError> {
//! let smallest = nth_min_from_path("numbers.xlsx", 1, &QueryOptions::default())?;
//! println!("smallest={smallest}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`NthMinError`]. Its [`ErrorKind`] is one of `NotFound`, `ReadError`,
//! `EmptyInput`, `InvalidRank`, `RankOutOfRange` or `Unexpected`, and [`ErrorKind::class`] tells a
//! transport whether to blame the request ([`ErrorClass::BadInput`]) or itself
//! ([`ErrorClass::ServerFault`]).
//!
//! ```rust
//! use nth_min::selection::select_nth_smallest;
//! use nth_min::{ErrorClass, ErrorKind};
//!
//! let err = select_nth_smallest(vec![7, 2, 9, 4, 2], 0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidRank);
//! assert_eq!(err.class(), ErrorClass::BadInput);
//! ```
//!
//! ## Modules
//!
//! - [`extraction`]: spreadsheet reading and the column-0 cell policy
//! - [`selection`]: rank validation and quickselect
//! - [`query`]: the composed entrypoint, request/report types and observers
//! - [`error`]: the shared error type

pub mod error;
pub mod extraction;
pub mod query;
pub mod selection;

pub use error::{ErrorClass, ErrorKind, NthMinError, NthMinResult};
