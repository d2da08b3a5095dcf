//! # ox-sheets-xlsx
//!
//! XLSX (Office Open XML spreadsheet) reader and writer for ox-sheets.
//!
//! [`XlsxReader`] decodes a package into an [`ox_sheets_core::Workbook`],
//! densifying the sparse on-disk rows. [`XlsxWriter`] renumbers the shared
//! text table and emits a complete package with fixed styles and theme.

pub mod error;
pub mod reader;
pub mod writer;

mod escape;
mod parts;
mod styles;
mod theme;

pub use error::{XlsxError, XlsxResult};
pub use parts::{worksheet_rid, NUMBER_STYLE_SLOT, SHEET_RID_OFFSET, TEXT_STYLE_SLOT};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
