//! Page store boundary
//!
//! The converter only asks whether a page exists and how a relative name resolves. The
//! batch migration additionally lists, reads and writes pages. Persistence itself belongs
//! to the implementor.

use std::collections::BTreeMap;

use crate::error::ConvertError;
use crate::naming;

pub trait PageStore {
    /// Whether a page with this absolute name exists
    fn exists(&self, name: &str) -> bool;

    /// Resolve `relative` as written on page `current` to an absolute page name
    fn resolve_absolute(&self, current: &str, relative: &str) -> String {
        naming::abs_page_name(current, relative)
    }

    /// Names of all pages, in the order they should be migrated
    fn page_names(&self) -> Result<Vec<String>, ConvertError>;

    fn read_page(&self, name: &str) -> Result<String, ConvertError>;

    fn write_page(&mut self, name: &str, text: &str) -> Result<(), ConvertError>;
}

/// In-memory page store, keyed by absolute page name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPageStore {
    pages: BTreeMap<String, String>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding empty pages with the given names, enough for existence checks
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryPageStore {
            pages: names
                .into_iter()
                .map(|name| (name.into(), String::new()))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.pages.insert(name.into(), text.into());
    }

    pub fn page(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }
}

impl PageStore for MemoryPageStore {
    fn exists(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    fn page_names(&self) -> Result<Vec<String>, ConvertError> {
        Ok(self.pages.keys().cloned().collect())
    }

    fn read_page(&self, name: &str) -> Result<String, ConvertError> {
        self.pages
            .get(name)
            .cloned()
            .ok_or_else(|| ConvertError::Store(format!("page '{name}' does not exist")))
    }

    fn write_page(&mut self, name: &str, text: &str) -> Result<(), ConvertError> {
        self.pages.insert(name.to_string(), text.to_string());
        Ok(())
    }
}
