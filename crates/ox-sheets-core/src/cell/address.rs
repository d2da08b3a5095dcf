//! Cell address codec ("B3" <-> zero-based row/column)

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address such as "B3"
///
/// Rows and columns are zero-based here and one-based in the textual form.
/// Column letters are a bijective base-26 numeral: A=1 … Z=26, AA=27, with
/// no digit for zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Decode an address from its textual form
    ///
    /// # Examples
    /// ```
    /// use ox_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!((addr.row, addr.col), (2, 1));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let split = bytes
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(bytes.len());

        if split == 0 {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }
        if split == bytes.len() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let (letters, digits) = s.split_at(split);
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "unexpected characters after row number in '{}'",
                s
            )));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("row number out of range in '{}'", s)))?;
        if row == 0 || row > MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row number must be within 1..={} in '{}'",
                MAX_ROWS, s
            )));
        }

        let col = Self::letters_to_column(letters)?;
        Ok(Self::new(row - 1, col))
    }

    /// Encode a zero-based column index as letters (0 = A, 25 = Z, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut n = u32::from(col) + 1;
        let mut digits = Vec::with_capacity(3);

        while n > 0 {
            let mut rem = n % 26;
            n /= 26;
            if rem == 0 {
                rem = 26;
                n -= 1;
            }
            digits.push(b'A' + (rem - 1) as u8);
        }

        digits.iter().rev().map(|&b| b as char).collect()
    }

    /// Decode column letters to a zero-based index (A = 0, Z = 25, AA = 26)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut value: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            value = value * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if value > u32::from(MAX_COLS) {
                return Err(Error::InvalidAddress(format!(
                    "column '{}' exceeds the {} column limit",
                    letters, MAX_COLS
                )));
            }
        }

        Ok((value - 1) as u16)
    }

    /// Format as "B3"
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular block of cells such as "A1:E6"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Create a range, normalizing corner order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse "A1:E6" or a single address
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(CellAddress::parse(a)?, CellAddress::parse(b)?)),
            None => {
                let addr = CellAddress::parse(s)?;
                Ok(Self::new(addr, addr))
            }
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(51), "AZ");
        assert_eq!(CellAddress::column_to_letters(52), "BA");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(702), "AAA");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 25);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(CellAddress::letters_to_column("xfd").unwrap(), 16383);
        assert!(CellAddress::letters_to_column("XFE").is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("B3").unwrap(), CellAddress::new(2, 1));
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(
            CellAddress::parse("XFD1048576").unwrap(),
            CellAddress::new(1_048_575, 16383)
        );
    }

    #[test]
    fn test_parse_malformed() {
        for bad in ["", "A", "12", "A0", "1A", "A1B", "$A$1", "A-1", "A1048577"] {
            assert!(
                matches!(CellAddress::parse(bad), Err(Error::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!(CellRange::parse("E6:A1").unwrap().to_string(), "A1:E6");
        assert_eq!(CellRange::parse("C3").unwrap().to_string(), "C3");
    }

    proptest! {
        #[test]
        fn column_letters_round_trip(col in 0u16..10_000) {
            let letters = CellAddress::column_to_letters(col);
            prop_assert_eq!(CellAddress::letters_to_column(&letters).unwrap(), col);
        }

        #[test]
        fn address_round_trip(row in 0u32..MAX_ROWS, col in 0u16..MAX_COLS) {
            let addr = CellAddress::new(row, col);
            prop_assert_eq!(CellAddress::parse(&addr.to_string()).unwrap(), addr);
        }
    }
}
