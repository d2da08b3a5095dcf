//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - One grid position and its payload
//! - [`CellAddress`] - A cell's location (e.g., "B3")
//! - [`CellRange`] - A block of cells (e.g., "A1:E6")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{format_number, Cell, CellKind, Expression};
