//! Package - the top-level document handle

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::workbook::Workbook;

/// Document kinds of the Office Open XML family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentKind {
    /// No document
    #[default]
    None,
    /// Spreadsheet (workbook)
    Spreadsheet,
    /// Word-processing document
    WordProcessing,
    /// Presentation
    Presentation,
}

impl DocumentKind {
    /// Map the application name declared in extended properties to a kind
    pub fn from_application(name: &str) -> Self {
        let name = name.trim();
        if name.starts_with("Microsoft Excel") {
            DocumentKind::Spreadsheet
        } else if name.starts_with("Microsoft Office Word") || name.starts_with("Microsoft Word")
        {
            DocumentKind::WordProcessing
        } else if name.starts_with("Microsoft Office PowerPoint")
            || name.starts_with("Microsoft PowerPoint")
        {
            DocumentKind::Presentation
        } else {
            DocumentKind::None
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::None => "none",
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::WordProcessing => "word-processing",
            DocumentKind::Presentation => "presentation",
        };
        f.write_str(name)
    }
}

/// Word-processing document (no behavior)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WordDocument;

/// Presentation document (no behavior)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Presentation;

/// The one document a package holds
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Document {
    /// Nothing loaded
    #[default]
    None,
    /// A workbook
    Spreadsheet(Workbook),
    /// Word-processing stub
    WordProcessing(WordDocument),
    /// Presentation stub
    Presentation(Presentation),
}

impl Document {
    /// Create an empty document of the given kind
    pub fn empty(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::None => Document::None,
            DocumentKind::Spreadsheet => Document::Spreadsheet(Workbook::empty()),
            DocumentKind::WordProcessing => Document::WordProcessing(WordDocument),
            DocumentKind::Presentation => Document::Presentation(Presentation),
        }
    }

    /// Get the document kind
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::None => DocumentKind::None,
            Document::Spreadsheet(_) => DocumentKind::Spreadsheet,
            Document::WordProcessing(_) => DocumentKind::WordProcessing,
            Document::Presentation(_) => DocumentKind::Presentation,
        }
    }
}

/// A document package and the path it was read from or will be written to
///
/// The archive itself is only open for the duration of a read or write.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Package {
    /// File path
    path: Option<PathBuf>,
    /// The document
    document: Document,
}

impl Package {
    /// Create a package with no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spreadsheet package around an existing workbook
    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            path: None,
            document: Document::Spreadsheet(workbook),
        }
    }

    /// Get the document kind
    pub fn kind(&self) -> DocumentKind {
        self.document.kind()
    }

    /// Replace the document with an empty one of `kind`
    ///
    /// Does nothing if the package already holds that kind.
    pub fn set_kind(&mut self, kind: DocumentKind) {
        if self.kind() != kind {
            self.document = Document::empty(kind);
        }
    }

    /// Get the stored path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set the stored path
    pub fn set_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.path = Some(path.into());
    }

    /// Get the document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the workbook, if this is a spreadsheet package
    pub fn workbook(&self) -> Option<&Workbook> {
        match &self.document {
            Document::Spreadsheet(wb) => Some(wb),
            _ => None,
        }
    }

    /// Get the workbook mutably, if this is a spreadsheet package
    pub fn workbook_mut(&mut self) -> Option<&mut Workbook> {
        match &mut self.document {
            Document::Spreadsheet(wb) => Some(wb),
            _ => None,
        }
    }

    /// Get the workbook or fail with [`Error::UnsupportedKind`]
    pub fn require_workbook_mut(&mut self) -> Result<&mut Workbook> {
        let kind = self.kind();
        self.workbook_mut()
            .ok_or_else(|| Error::UnsupportedKind(kind.to_string()))
    }

    /// Take the workbook out of the package
    pub fn into_workbook(self) -> Option<Workbook> {
        match self.document {
            Document::Spreadsheet(wb) => Some(wb),
            _ => None,
        }
    }
}
