//! Package member paths, relationship ids and style slots
//!
//! The encoder and the stylesheet/relationship members it emits both read
//! these, so the numbers below are the single source of truth.

pub(crate) const CONTENT_TYPES: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS: &str = "_rels/.rels";
pub(crate) const CORE_PROPS: &str = "docProps/core.xml";
pub(crate) const APP_PROPS: &str = "docProps/app.xml";
pub(crate) const WORKBOOK: &str = "xl/workbook.xml";
pub(crate) const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
pub(crate) const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
pub(crate) const STYLES: &str = "xl/styles.xml";
pub(crate) const THEME: &str = "xl/theme/theme1.xml";

/// Archive path of the `index`-th (0-based) worksheet
pub(crate) fn worksheet_path(index: usize) -> String {
    format!("xl/worksheets/sheet{}.xml", index + 1)
}

/// Relationship target of the `index`-th worksheet, relative to `xl/`
pub(crate) fn worksheet_target(index: usize) -> String {
    format!("worksheets/sheet{}.xml", index + 1)
}

// === Workbook relationships ===

pub(crate) const THEME_RID: &str = "rId1";
pub(crate) const STYLES_RID: &str = "rId2";
pub(crate) const SHARED_STRINGS_RID: &str = "rId3";

/// First worksheet relationship number; 1..=3 are taken by the fixed parts above
pub const SHEET_RID_OFFSET: usize = 4;

/// Relationship id of the `index`-th worksheet
pub fn worksheet_rid(index: usize) -> String {
    format!("rId{}", index + SHEET_RID_OFFSET)
}

// === Style slots (cellXfs indices in the emitted stylesheet) ===

/// Style index carried by text-reference cells
pub const TEXT_STYLE_SLOT: u32 = 1;

/// Style index carried by number cells
pub const NUMBER_STYLE_SLOT: u32 = 2;

// === Namespaces and relationship types ===

pub(crate) const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub(crate) const NS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub(crate) const REL_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub(crate) const REL_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
pub(crate) const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub(crate) const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
pub(crate) const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// Application name written to extended properties and expected on read
pub(crate) const APPLICATION_NAME: &str = "Microsoft Excel";
