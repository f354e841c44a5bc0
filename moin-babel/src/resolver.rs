//! Reference resolution against the rename map
//!
//! A miss always returns exactly what the caller passed in. A hit on a name that was
//! written relatively keeps that framing when the new name still sits under the same
//! ancestor, and falls back to the absolute new name otherwise.

use crate::naming::{self, url_unquote};
use crate::rename::{RenameKey, RenameMap};
use crate::store::PageStore;

/// Resolves page and attachment references seen on one page
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    current_page: &'a str,
    renames: &'a RenameMap,
    store: &'a dyn PageStore,
}

impl<'a> Resolver<'a> {
    pub fn new(current_page: &'a str, renames: &'a RenameMap, store: &'a dyn PageStore) -> Self {
        Resolver {
            current_page,
            renames,
            store,
        }
    }

    pub fn current_page(&self) -> &'a str {
        self.current_page
    }

    /// New name for the page reference `raw`
    pub fn resolve_page(&self, raw: &str) -> String {
        let absolute = self.store.resolve_absolute(self.current_page, raw);
        let Some(new_name) = self.lookup_page(&absolute) else {
            return raw.to_string();
        };
        if naming::is_relative(raw) {
            if let Some(relative) = naming::reframe_relative(self.current_page, raw, new_name) {
                return relative;
            }
        }
        new_name.to_string()
    }

    /// Like [`Resolver::resolve_page`], keeping an optional `#anchor` suffix untouched.
    pub fn resolve_target(&self, target: &str) -> String {
        match target.split_once('#') {
            Some((page, anchor)) => format!("{}#{anchor}", self.resolve_page(page)),
            None => self.resolve_page(target),
        }
    }

    /// New name for attachment `raw_file` of the absolute page `page`.
    ///
    /// The raw (possibly percent-encoded) name is looked up first, then the decoded result
    /// is looked up again, so both legacy encoded and decoded entries apply.
    pub fn resolve_file(&self, page: &str, raw_file: &str) -> String {
        let page = self.store.resolve_absolute(self.current_page, page);
        let encoded = self
            .renames
            .get(&RenameKey::file(page.as_str(), raw_file))
            .unwrap_or(raw_file);
        let decoded = url_unquote(encoded);
        match self.renames.get(&RenameKey::file(page, decoded.as_str())) {
            Some(renamed) => renamed.to_string(),
            None => decoded,
        }
    }

    fn lookup_page(&self, absolute: &str) -> Option<&'a str> {
        self.renames.get(&RenameKey::page(absolute)).or_else(|| {
            // 1.5 links commonly spelled blanks as underscores
            if absolute.contains('_') {
                self.renames
                    .get(&RenameKey::page(absolute.replace('_', " ")))
            } else {
                None
            }
        })
    }
}
