//! Rename map: old page and attachment identifiers to their new names
//!
//! The map is produced by an earlier migration pass and is read-only while pages are
//! converted. Its text form has one entry per line:
//!
//! ```text
//! PAGE|some_page|some page
//! FILE|SomePage|with%20blank.txt|with blank.txt
//! ```

use std::collections::HashMap;

use crate::error::ConvertError;

/// Lookup key into a [`RenameMap`]. Page names are always absolute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenameKey {
    Page(String),
    File(String, String),
}

impl RenameKey {
    pub fn page(name: impl Into<String>) -> Self {
        RenameKey::Page(name.into())
    }

    pub fn file(page: impl Into<String>, file: impl Into<String>) -> Self {
        RenameKey::File(page.into(), file.into())
    }
}

/// Old identifier to new name. A missing entry means "keep the name".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenameMap {
    entries: HashMap<RenameKey, String>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: RenameKey, new_name: impl Into<String>) {
        self.entries.insert(key, new_name.into());
    }

    pub fn get(&self, key: &RenameKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RenameKey, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Parse the `|` separated rename list format.
    ///
    /// Blank lines and lines starting with `#` are skipped. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let mut map = RenameMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let error = |reason: String| ConvertError::RenameList {
                line: index + 1,
                reason,
            };
            let fields: Vec<&str> = line.split('|').collect();
            match fields.as_slice() {
                ["PAGE", old, new] => map.insert(RenameKey::page(*old), *new),
                ["FILE", page, old, new] => map.insert(RenameKey::file(*page, *old), *new),
                ["PAGE", ..] => return Err(error("PAGE entries need 2 names".to_string())),
                ["FILE", ..] => {
                    return Err(error("FILE entries need a page and 2 names".to_string()))
                }
                [kind, ..] => return Err(error(format!("unknown kind '{kind}'"))),
                [] => unreachable!("split always yields at least one field"),
            }
        }
        Ok(map)
    }
}

impl FromIterator<(RenameKey, String)> for RenameMap {
    fn from_iter<I: IntoIterator<Item = (RenameKey, String)>>(iter: I) -> Self {
        RenameMap {
            entries: iter.into_iter().collect(),
        }
    }
}
