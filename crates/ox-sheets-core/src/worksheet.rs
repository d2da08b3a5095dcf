//! Worksheet type

use crate::cell::{Cell, CellAddress};
use crate::column::Column;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet: metadata plus a dense, rectangular grid of cells
///
/// Every row holds exactly [`column_count`](Worksheet::column_count) cells
/// after any operation on this type. Row and column counts only ever grow.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Worksheet {
    /// Sheet title
    name: String,
    /// Numeric sheet id
    id: u32,
    /// Package-internal relationship id (e.g. "rId4")
    relationship_id: String,
    /// Default row height in points
    default_row_height: Option<f64>,
    /// Frozen panes
    freeze: Freeze,
    /// Auto-filter column range
    filter: Option<Filter>,
    /// Per-column metadata, created lazily
    columns: Vec<Column>,
    /// Grid rows
    rows: Vec<Row>,
    /// Cells per row
    column_count: usize,
}

impl Worksheet {
    /// Create a new, empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            id: 0,
            relationship_id: String::new(),
            default_row_height: None,
            freeze: Freeze::None,
            filter: None,
            columns: Vec::new(),
            rows: Vec::new(),
            column_count: 0,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Get the numeric sheet id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Set the numeric sheet id
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Get the relationship id linking the workbook to this sheet's part
    pub fn relationship_id(&self) -> &str {
        &self.relationship_id
    }

    /// Set the relationship id
    pub fn set_relationship_id<S: Into<String>>(&mut self, rid: S) {
        self.relationship_id = rid.into();
    }

    // === Grid ===

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in every row
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a cell by position
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    /// Get a mutable cell by position, without growing the grid
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cell_mut(col))
    }

    /// Get a cell by address ("B3")
    pub fn cell_at(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell(addr.row as usize, addr.col as usize))
    }

    /// Return the cell at `(row, col)`, growing the grid first if needed
    ///
    /// Every existing row is widened to at least `col + 1` cells, then rows
    /// are appended up to `row + 1`, each pre-filled to the new width.
    pub fn create_cell(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        if row >= MAX_ROWS as usize {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS as usize {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }

        self.fill_columns(col + 1);
        self.fill_rows(row + 1);

        Ok(&mut self.rows[row].cells_mut()[col])
    }

    /// Replace the cell at `(row, col)`, growing the grid if needed
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        *self.create_cell(row, col)? = cell;
        Ok(())
    }

    /// Widen every row to at least `width` cells
    pub fn fill_columns(&mut self, width: usize) {
        if width <= self.column_count {
            return;
        }
        for row in &mut self.rows {
            row.pad_to(width, &Cell::Empty);
        }
        self.column_count = width;
    }

    /// Append empty rows until there are at least `count`
    pub fn fill_rows(&mut self, count: usize) {
        while self.rows.len() < count {
            self.rows.push(Row::with_width(self.column_count));
        }
    }

    /// Append a row, widening the sheet or the row so the grid stays rectangular
    pub fn add_row(&mut self, mut row: Row) {
        self.fill_columns(row.len());
        row.pad_to(self.column_count, &Cell::Empty);
        self.rows.push(row);
    }

    /// Check that every row holds exactly `column_count` cells
    pub fn is_dense(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.column_count)
    }

    /// Iterate over non-empty cells as `(row, col, cell)` in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.cells()
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(c, cell)| (r, c, cell))
        })
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flat_map(|row| row.cells_mut().iter_mut())
    }

    // === Layout ===

    /// Default row height, if one is set
    pub fn default_row_height(&self) -> Option<f64> {
        self.default_row_height
    }

    /// Set the default row height; zero or negative clears it
    pub fn set_default_row_height(&mut self, height: f64) {
        self.default_row_height = (height > 0.0).then_some(height);
    }

    /// Get the freeze setting
    pub fn freeze(&self) -> Freeze {
        self.freeze
    }

    /// Freeze rows or columns; a zero count unfreezes
    pub fn set_freeze(&mut self, freeze: Freeze) {
        self.freeze = match freeze {
            Freeze::TopRows(0) | Freeze::LeftColumns(0) => Freeze::None,
            other => other,
        };
    }

    /// Get the auto-filter range
    pub fn filter(&self) -> Option<Filter> {
        self.filter
    }

    /// Add an auto-filter over columns `first..=last`
    pub fn set_filter(&mut self, first_column: u16, last_column: u16) {
        self.filter = Some(Filter::new(first_column, last_column));
    }

    /// Remove the auto-filter
    pub fn remove_filter(&mut self) {
        self.filter = None;
    }

    // === Columns ===

    /// Per-column metadata created so far
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get column metadata by index
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get column metadata, or the default when none was created
    pub fn column_or_default(&self, index: usize) -> Column {
        self.columns.get(index).copied().unwrap_or_default()
    }

    /// Get mutable column metadata, creating defaults up to `index`
    pub fn column_mut(&mut self, index: usize) -> &mut Column {
        if self.columns.len() <= index {
            self.columns.resize(index + 1, Column::new());
        }
        &mut self.columns[index]
    }
}

/// Frozen panes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Freeze {
    /// Nothing frozen
    #[default]
    None,
    /// The first N rows stay in view
    TopRows(u32),
    /// The first N columns stay in view
    LeftColumns(u32),
}

/// Auto-filter over an inclusive column range, spanning all rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filter {
    /// First filtered column (0-based)
    pub first_column: u16,
    /// Last filtered column (0-based, inclusive)
    pub last_column: u16,
}

impl Filter {
    /// Create a filter, ordering the bounds
    pub fn new(a: u16, b: u16) -> Self {
        Self {
            first_column: a.min(b),
            last_column: a.max(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_cell_grows_rectangular() {
        let mut ws = Worksheet::new("Test");
        ws.create_cell(0, 0).unwrap().set_number(1.0);
        ws.create_cell(2, 4).unwrap().set_number(2.0);

        assert_eq!(ws.row_count(), 3);
        assert_eq!(ws.column_count(), 5);
        assert!(ws.is_dense());
        assert_eq!(ws.cell(0, 0), Some(&Cell::Number(1.0)));
        assert_eq!(ws.cell(2, 4), Some(&Cell::Number(2.0)));
        assert_eq!(ws.cell(1, 3), Some(&Cell::Empty));
    }

    #[test]
    fn test_create_cell_within_bounds_returns_existing() {
        let mut ws = Worksheet::new("Test");
        ws.create_cell(1, 1).unwrap().set_number(9.0);
        assert_eq!(ws.create_cell(1, 1).unwrap().number(), Some(9.0));
        assert_eq!(ws.row_count(), 2);
        assert_eq!(ws.column_count(), 2);
    }

    #[test]
    fn test_create_cell_out_of_bounds() {
        let mut ws = Worksheet::new("Test");
        assert!(matches!(
            ws.create_cell(MAX_ROWS as usize, 0),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            ws.create_cell(0, MAX_COLS as usize),
            Err(Error::ColumnOutOfBounds(..))
        ));
        assert_eq!(ws.row_count(), 0);
    }

    #[test]
    fn test_add_row_keeps_grid_dense() {
        let mut ws = Worksheet::new("Test");
        ws.add_row(Row::from_iter([Cell::Number(1.0)]));
        ws.add_row(Row::from_iter([Cell::Number(2.0), Cell::Number(3.0)]));
        ws.add_row(Row::new());

        assert_eq!(ws.column_count(), 2);
        assert!(ws.is_dense());
        assert_eq!(ws.cell(0, 1), Some(&Cell::Empty));
    }

    #[test]
    fn test_iter_cells_skips_empty() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell(0, 1, Cell::Number(5.0)).unwrap();
        ws.set_cell(1, 0, Cell::placeholder()).unwrap();

        let cells: Vec<_> = ws.iter_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cells, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_freeze_and_filter() {
        let mut ws = Worksheet::new("Test");
        ws.set_freeze(Freeze::TopRows(1));
        assert_eq!(ws.freeze(), Freeze::TopRows(1));
        ws.set_freeze(Freeze::LeftColumns(0));
        assert_eq!(ws.freeze(), Freeze::None);

        ws.set_filter(4, 0);
        assert_eq!(ws.filter(), Some(Filter::new(0, 4)));
        ws.remove_filter();
        assert_eq!(ws.filter(), None);
    }

    #[test]
    fn test_columns_created_lazily() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.columns().is_empty());
        ws.column_mut(2).width = 30.0;
        assert_eq!(ws.columns().len(), 3);
        assert_eq!(ws.column_or_default(0), Column::new());
        assert_eq!(ws.column_or_default(2).width, 30.0);
        assert_eq!(ws.column_or_default(9), Column::new());
    }

    #[test]
    fn test_default_row_height() {
        let mut ws = Worksheet::new("Test");
        ws.set_default_row_height(18.5);
        assert_eq!(ws.default_row_height(), Some(18.5));
        ws.set_default_row_height(0.0);
        assert_eq!(ws.default_row_height(), None);
    }
}
