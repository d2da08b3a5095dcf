//! Column metadata

/// Width used for columns that carry no explicit metadata
pub const DEFAULT_COLUMN_WIDTH: f64 = 15.0;

/// Column metadata
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Absolute width in character units
    pub width: f64,
    /// Width follows content (best fit)
    pub auto_width: bool,
}

impl Column {
    /// Create a column with the default width and auto-width on
    pub fn new() -> Self {
        Self {
            width: DEFAULT_COLUMN_WIDTH,
            auto_width: true,
        }
    }

    /// Create a column with explicit settings
    pub fn with_width(width: f64, auto_width: bool) -> Self {
        Self { width, auto_width }
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}
