//! Shared text table
//!
//! The package-wide string dictionary that text cells point into. Entries are
//! stored once, in id order, with a second index from text to id.

use ahash::AHashMap;

use crate::error::{Error, Result};

/// Mapping from pre-renumber ids to post-renumber ids
pub type RenumberMap = AHashMap<u32, u32>;

/// Deduplicated, densely numbered string dictionary
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SharedTextTable {
    /// Entry text, indexed by id
    entries: Vec<String>,
    /// Text -> id of its first entry
    #[cfg_attr(feature = "serde", serde(skip))]
    by_text: AHashMap<String, u32>,
}

impl SharedTextTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of an entry equal to `text`, adding one if needed
    pub fn insert(&mut self, text: &str) -> u32 {
        if let Some(&id) = self.by_text.get(text) {
            return id;
        }
        self.append(text.to_string())
    }

    /// Append an entry without deduplication, returning its id
    ///
    /// Used when loading a stored dictionary, where ids are positional and
    /// must stay valid for the cells that reference them. A repeated text
    /// keeps resolving to its first id through [`find_by_text`].
    ///
    /// [`find_by_text`]: SharedTextTable::find_by_text
    pub fn push(&mut self, text: String) -> u32 {
        if let Some(&id) = self.by_text.get(text.as_str()) {
            let next = self.entries.len() as u32;
            self.entries.push(text);
            log::debug!("shared text entry {next} repeats entry {id}");
            return next;
        }
        self.append(text)
    }

    fn append(&mut self, text: String) -> u32 {
        let id = self.entries.len() as u32;
        self.by_text.insert(text.clone(), id);
        self.entries.push(text);
        id
    }

    /// Look up an entry's text by id
    pub fn find_by_id(&self, id: u32) -> Option<&str> {
        self.entries.get(id as usize).map(String::as_str)
    }

    /// Look up an entry's id by text
    pub fn find_by_text(&self, text: &str) -> Option<u32> {
        self.by_text.get(text).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, text)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, text)| (id as u32, text.as_str()))
    }

    /// Build a fresh table holding only the referenced entries
    ///
    /// `referenced` lists old ids in first-encounter order (repeats allowed).
    /// New ids are assigned densely in that order; equal text always maps to
    /// one new id. Entries never referenced are dropped. Fails if an id is not
    /// present in this table.
    pub fn renumber<I>(&self, referenced: I) -> Result<(SharedTextTable, RenumberMap)>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut fresh = SharedTextTable::new();
        let mut map = RenumberMap::new();

        for old in referenced {
            if map.contains_key(&old) {
                continue;
            }
            let text = self.find_by_id(old).ok_or(Error::UnknownSharedText(old))?;
            map.insert(old, fresh.insert(text));
        }

        Ok((fresh, map))
    }
}

impl PartialEq for SharedTextTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_dedups() {
        let mut table = SharedTextTable::new();
        assert_eq!(table.insert("alpha"), 0);
        assert_eq!(table.insert("beta"), 1);
        assert_eq!(table.insert("alpha"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_by_text("beta"), Some(1));
        assert_eq!(table.find_by_id(0), Some("alpha"));
        assert_eq!(table.find_by_id(2), None);
        assert_eq!(table.find_by_text("gamma"), None);
    }

    #[test]
    fn test_push_keeps_positional_ids() {
        let mut table = SharedTextTable::new();
        table.push("x".into());
        table.push("y".into());
        assert_eq!(table.push("x".into()), 2);
        assert_eq!(table.find_by_id(2), Some("x"));
        assert_eq!(table.find_by_text("x"), Some(0));
    }

    #[test]
    fn test_renumber_prunes_and_orders() {
        let mut table = SharedTextTable::new();
        table.insert("unused");
        table.insert("second");
        table.insert("first");

        let (fresh, map) = table.renumber([2, 1, 2]).unwrap();
        assert_eq!(
            fresh.iter().collect::<Vec<_>>(),
            vec![(0, "first"), (1, "second")]
        );
        assert_eq!(map.get(&2), Some(&0));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.get(&0), None);
        assert_eq!(fresh.find_by_text("unused"), None);
    }

    #[test]
    fn test_renumber_merges_repeated_text() {
        let mut table = SharedTextTable::new();
        table.push("dup".into());
        table.push("dup".into());

        let (fresh, map) = table.renumber([1, 0]).unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(map.get(&1), Some(&0));
        assert_eq!(map.get(&0), Some(&0));
    }

    #[test]
    fn test_renumber_unknown_id() {
        let table = SharedTextTable::new();
        assert!(matches!(
            table.renumber([5]),
            Err(Error::UnknownSharedText(5))
        ));
    }
}
