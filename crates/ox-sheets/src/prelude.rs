//! Prelude module - common imports for ox-sheets users
//!
//! ```rust
//! use ox_sheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellKind,
    CellRange,
    Column,
    Expression,

    // Document model
    Document,
    DocumentKind,
    Filter,
    Freeze,
    Package,
    Row,
    SharedTextTable,
    Workbook,
    Worksheet,

    // I/O
    PackageExt,
    WorkbookExt,
    XlsxReader,
    XlsxWriter,

    // Errors
    Error,
    Result,
    XlsxError,
    XlsxResult,
};
