//! Row type

use crate::cell::Cell;

/// An ordered sequence of cells
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row of `width` empty cells
    pub fn with_width(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width],
        }
    }

    /// Append a cell
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Get a cell by column index
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get a mutable cell by column index
    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    /// All cells in column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Grow to at least `width` cells, padding with `filler`
    pub(crate) fn pad_to(&mut self, width: usize, filler: &Cell) {
        if self.cells.len() < width {
            self.cells.resize(width, filler.clone());
        }
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
