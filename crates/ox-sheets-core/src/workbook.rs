//! Workbook type - the spreadsheet document

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::shared_text::SharedTextTable;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Owns its worksheets and the shared text table that all of their text cells
/// point into. Cloning yields a fully independent copy, table included.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Workbook {
    /// Worksheets in declared order
    worksheets: Vec<Worksheet>,
    /// Text dictionary shared by every sheet
    shared_text: SharedTextTable,
}

impl Workbook {
    /// Create a workbook with one empty worksheet named "Sheet1"
    pub fn new() -> Self {
        let mut wb = Self::empty();
        wb.push_worksheet(Worksheet::new("Sheet1"));
        wb
    }

    /// Create a workbook with no worksheets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Iterate over all worksheets mutably
    pub fn worksheets_mut(&mut self) -> impl Iterator<Item = &mut Worksheet> {
        self.worksheets.iter_mut()
    }

    /// Add a new, empty worksheet after validating its name
    pub fn add_worksheet(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        Ok(self.push_worksheet(Worksheet::new(name)))
    }

    /// Append a worksheet as-is, returning its index
    pub fn push_worksheet(&mut self, worksheet: Worksheet) -> usize {
        self.worksheets.push(worksheet);
        self.worksheets.len() - 1
    }

    /// The shared text table
    pub fn shared_text(&self) -> &SharedTextTable {
        &self.shared_text
    }

    /// The shared text table, mutably
    pub fn shared_text_mut(&mut self) -> &mut SharedTextTable {
        &mut self.shared_text
    }

    // === Cell Access ===

    fn sheet_mut(&mut self, index: usize) -> Result<&mut Worksheet> {
        let count = self.worksheets.len();
        self.worksheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))
    }

    /// Store text in a cell, creating the cell if needed
    ///
    /// Equal text shares one table entry. Returns the entry id.
    pub fn set_cell_text(
        &mut self,
        sheet: usize,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<u32> {
        let count = self.worksheets.len();
        let ws = self
            .worksheets
            .get_mut(sheet)
            .ok_or(Error::SheetOutOfBounds(sheet, count))?;
        let cell = ws.create_cell(row, col)?;
        Ok(cell.set_text(&mut self.shared_text, text))
    }

    /// Store a number in a cell, creating the cell if needed
    pub fn set_cell_number(
        &mut self,
        sheet: usize,
        row: usize,
        col: usize,
        value: f64,
    ) -> Result<()> {
        self.sheet_mut(sheet)?.create_cell(row, col)?.set_number(value);
        Ok(())
    }

    /// Store a formula and/or computed value in a cell, creating the cell if needed
    pub fn set_cell_expression(
        &mut self,
        sheet: usize,
        row: usize,
        col: usize,
        formula: Option<&str>,
        value: Option<&str>,
    ) -> Result<()> {
        self.sheet_mut(sheet)?
            .create_cell(row, col)?
            .set_expression(formula.map(str::to_string), value.map(str::to_string));
        Ok(())
    }

    /// Display text of a cell; `None` for empty or missing cells
    pub fn cell_display_text(
        &self,
        sheet: usize,
        row: usize,
        col: usize,
    ) -> Result<Option<String>> {
        let ws = self
            .worksheets
            .get(sheet)
            .ok_or(Error::SheetOutOfBounds(sheet, self.worksheets.len()))?;
        match ws.cell(row, col) {
            Some(cell) => cell.display_text(&self.shared_text),
            None => Ok(None),
        }
    }

    /// Text of a cell if it is a text-reference cell
    pub fn cell_text(&self, cell: &Cell) -> Option<&str> {
        cell.reference().and_then(|id| self.shared_text.find_by_id(id))
    }

    // === Shared Text ===

    /// Rebuild the shared text table from the ids cells actually reference
    ///
    /// Walks sheets, then rows, then columns; ids are reassigned densely in
    /// first-encounter order and unreferenced entries are dropped. Every cell
    /// is rewritten to its new id. Nothing changes if a cell references an id
    /// the table does not hold.
    pub fn renumber_shared_text(&mut self) -> Result<()> {
        let referenced: Vec<u32> = self
            .worksheets
            .iter()
            .flat_map(|ws| ws.rows())
            .flat_map(|row| row.cells())
            .filter_map(Cell::reference)
            .collect();

        let (fresh, map) = self.shared_text.renumber(referenced)?;

        for cell in self.worksheets.iter_mut().flat_map(|ws| ws.cells_mut()) {
            if let Cell::Reference(id) = cell {
                if let Some(&new_id) = map.get(&*id) {
                    *id = new_id;
                }
            }
        }
        self.shared_text = fresh;
        Ok(())
    }

    // === Internal ===

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "'{}' exceeds {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name
            .chars()
            .find(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        {
            return Err(Error::InvalidSheetName(format!(
                "'{}' contains invalid character '{}'",
                name, c
            )));
        }
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().eq_ignore_ascii_case(name))
        {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }
}
