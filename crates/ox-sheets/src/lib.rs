//! # ox-sheets
//!
//! A Rust library for reading and writing Office Open XML spreadsheets.
//!
//! ## Features
//!
//! - Decode `.xlsx` packages into a dense, rectangular cell grid
//! - Encode a workbook back into a complete package
//! - Shared text table with deduplication and renumbering on write
//! - Column widths, default row height, frozen panes and auto-filters
//!
//! ## Example
//!
//! ```rust
//! use ox_sheets::prelude::*;
//! use std::io::Cursor;
//!
//! let mut workbook = Workbook::new();
//! workbook.set_cell_text(0, 0, 0, "Datum").unwrap();
//! workbook.set_cell_number(0, 1, 0, 42.0).unwrap();
//!
//! let mut buf = Cursor::new(Vec::new());
//! XlsxWriter::write(&mut workbook, &mut buf).unwrap();
//!
//! buf.set_position(0);
//! let read = XlsxReader::read(buf).unwrap();
//! assert_eq!(
//!     read.cell_display_text(0, 1, 0).unwrap().as_deref(),
//!     Some("42")
//! );
//!
//! // Save to file
//! // workbook.save("output.xlsx").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use ox_sheets_core::{
    format_number,
    // Cell types
    Cell,
    CellAddress,
    CellKind,
    CellRange,
    Column,
    // Main types
    Document,
    DocumentKind,
    // Error types
    Error,
    Expression,
    Filter,
    Freeze,
    Package,
    Presentation,
    RenumberMap,
    Result,
    Row,
    SharedTextTable,
    WordDocument,
    Workbook,
    Worksheet,

    DEFAULT_COLUMN_WIDTH,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use ox_sheets_xlsx::{XlsxError, XlsxReader, XlsxResult, XlsxWriter};

use std::path::Path;

/// Extension trait for Package to add file I/O
pub trait PackageExt: Sized {
    /// Open a package from a file, remembering the path
    fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self>;

    /// Write the package back to the path it was opened from or last written to
    fn write(&mut self) -> XlsxResult<()>;

    /// Write the package to `path` and remember it
    fn write_to<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()>;
}

impl PackageExt for Package {
    fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Package> {
        XlsxReader::open_file(path)
    }

    fn write(&mut self) -> XlsxResult<()> {
        let path = self.path().ok_or(XlsxError::MissingPath)?.to_path_buf();
        XlsxWriter::write_package_file(self, path)
    }

    fn write_to<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()> {
        XlsxWriter::write_package_file(self, path)
    }
}

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt: Sized {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self>;

    /// Save the workbook to a file
    ///
    /// Takes `&mut self` because saving renumbers the shared text table.
    fn save<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        XlsxReader::read_file(path)
    }

    fn save<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()> {
        XlsxWriter::write_file(self, path)
    }
}
