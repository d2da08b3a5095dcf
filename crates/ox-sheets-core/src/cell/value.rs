//! Cell state

use std::fmt;

use crate::error::{Error, Result};
use crate::shared_text::SharedTextTable;

/// The kind of payload a cell currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// No kind assigned
    Empty,
    /// Id into the workbook's shared text table
    Reference,
    /// Formula text and/or a pre-computed value
    Expression,
    /// Floating-point value
    Number,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Empty => "empty",
            CellKind::Reference => "reference",
            CellKind::Expression => "expression",
            CellKind::Number => "number",
        };
        f.write_str(name)
    }
}

/// An opaque formula together with its last computed result
///
/// Formulas are never evaluated; both parts are stored as text.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    /// Formula text, without a leading '='
    pub formula: Option<String>,
    /// Pre-computed result
    pub value: Option<String>,
}

impl Expression {
    /// Create an expression from its parts
    pub fn new(formula: Option<String>, value: Option<String>) -> Self {
        Self { formula, value }
    }

    /// The filler used for grid positions omitted from the sparse on-disk form
    pub fn placeholder() -> Self {
        Self {
            formula: None,
            value: Some(String::new()),
        }
    }

    /// True for an expression with no formula and no (or empty) value
    pub fn is_placeholder(&self) -> bool {
        self.formula.is_none() && self.value.as_deref().map_or(true, str::is_empty)
    }
}

/// A single cell
///
/// Exactly one payload is live at a time; every setter replaces the whole
/// variant, so no stale payload survives a state change.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// No kind assigned
    #[default]
    Empty,
    /// Id into the shared text table
    Reference(u32),
    /// Formula and/or computed value
    Expression(Expression),
    /// Numeric value
    Number(f64),
}

impl Cell {
    /// Create a placeholder cell
    pub fn placeholder() -> Self {
        Cell::Expression(Expression::placeholder())
    }

    /// Get the cell kind
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Reference(_) => CellKind::Reference,
            Cell::Expression(_) => CellKind::Expression,
            Cell::Number(_) => CellKind::Number,
        }
    }

    /// Check if the cell has no kind assigned
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Get the shared text id, if this is a text-reference cell
    pub fn reference(&self) -> Option<u32> {
        match self {
            Cell::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// Get the number, if this is a number cell
    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the expression, if this is an expression cell
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Cell::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Cell::Empty;
    }

    /// Make this a number cell
    pub fn set_number(&mut self, value: f64) {
        *self = Cell::Number(value);
    }

    /// Make this an expression cell
    pub fn set_expression(&mut self, formula: Option<String>, value: Option<String>) {
        *self = Cell::Expression(Expression::new(formula, value));
    }

    /// Make this a text-reference cell, reusing an existing table entry for
    /// equal text
    pub fn set_text(&mut self, table: &mut SharedTextTable, text: &str) -> u32 {
        self.clear();
        let id = table.insert(text);
        *self = Cell::Reference(id);
        id
    }

    /// Text shown for this cell, or `None` for an empty cell
    ///
    /// Reference cells resolve through `table`; expression cells prefer the
    /// formula, then the computed value; numbers use the shortest decimal
    /// form that reads back to the same value.
    pub fn display_text(&self, table: &SharedTextTable) -> Result<Option<String>> {
        match self {
            Cell::Empty => Ok(None),
            Cell::Reference(id) => table
                .find_by_id(*id)
                .map(|text| Some(text.to_string()))
                .ok_or(Error::UnknownSharedText(*id)),
            Cell::Expression(expr) => Ok(Some(
                expr.formula
                    .as_deref()
                    .or(expr.value.as_deref())
                    .unwrap_or_default()
                    .to_string(),
            )),
            Cell::Number(n) => Ok(Some(format_number(*n))),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<Expression> for Cell {
    fn from(expr: Expression) -> Self {
        Cell::Expression(expr)
    }
}

/// Shortest round-trip decimal form of `n`
pub fn format_number(n: f64) -> String {
    // `Display` for f64 already yields the shortest representation that
    // parses back to the same bits; only negative zero needs normalizing.
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
