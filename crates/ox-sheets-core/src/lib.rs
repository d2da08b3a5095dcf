//! # ox-sheets-core
//!
//! Core data structures for the ox-sheets spreadsheet codec.
//!
//! This crate provides the in-memory document model the XLSX reader fills
//! and the writer serializes:
//! - [`Package`] - A document handle holding one [`Document`]
//! - [`Workbook`], [`Worksheet`], [`Row`], [`Cell`] - The spreadsheet grid
//! - [`CellAddress`] - Conversion between "B3" and zero-based indices
//! - [`SharedTextTable`] - The deduplicated string dictionary text cells use
//!
//! ## Example
//!
//! ```rust
//! use ox_sheets_core::Workbook;
//!
//! let mut workbook = Workbook::new();
//! workbook.set_cell_text(0, 0, 0, "Datum").unwrap();
//! workbook.set_cell_number(0, 1, 0, 42.0).unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(
//!     workbook.cell_display_text(0, 0, 0).unwrap().as_deref(),
//!     Some("Datum")
//! );
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod package;
pub mod row;
pub mod shared_text;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{format_number, Cell, CellAddress, CellKind, CellRange, Expression};
pub use column::{Column, DEFAULT_COLUMN_WIDTH};
pub use error::{Error, Result};
pub use package::{Document, DocumentKind, Package, Presentation, WordDocument};
pub use row::Row;
pub use shared_text::{RenumberMap, SharedTextTable};
pub use workbook::Workbook;
pub use worksheet::{Filter, Freeze, Worksheet};

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
