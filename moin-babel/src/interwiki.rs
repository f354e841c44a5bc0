//! Interwiki map: wiki tags and the URLs they point to
//!
//! `Self` always names the local wiki, as does the optional local interwiki name of the
//! site being migrated. The text form is the classic `intermap.txt`: one `Tag URL` pair per
//! line, `#` starting a comment.

use std::collections::BTreeMap;

pub const SELF_TAG: &str = "Self";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterwikiMap {
    entries: BTreeMap<String, String>,
    local_name: Option<String>,
}

impl InterwikiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interwiki name of the wiki being migrated; links tagged with it are local.
    pub fn with_local_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.local_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub fn insert(&mut self, tag: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(tag.into(), url.into());
    }

    /// URL registered for `tag`, if it names a remote wiki
    pub fn url(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    /// Whether `tag` refers to this wiki
    pub fn is_local(&self, tag: &str) -> bool {
        tag.is_empty() || tag == SELF_TAG || self.local_name.as_deref() == Some(tag)
    }

    /// Whether `tag` can be resolved at all (local or registered)
    pub fn contains(&self, tag: &str) -> bool {
        tag == SELF_TAG || self.local_name.as_deref() == Some(tag) || self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extend with the entries of an `intermap.txt` file. Later entries win.
    pub fn extend_from_intermap(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            if let (Some(tag), Some(url)) = (parts.next(), parts.next()) {
                self.insert(tag, url);
            }
        }
    }

    /// Parse an `intermap.txt` file. Lines without a URL are ignored.
    pub fn parse(text: &str) -> Self {
        let mut map = InterwikiMap::new();
        map.extend_from_intermap(text);
        map
    }
}

/// Split a wiki URL into `(tag, tail)`.
///
/// `MoinMoin:FrontPage` gives `("MoinMoin", "FrontPage")`, `Tag/Page` gives `("Tag", "Page")`
/// and a bare `FrontPage` belongs to `Self`.
pub fn split_wiki(url: &str) -> (&str, &str) {
    url.split_once(':')
        .or_else(|| url.split_once('/'))
        .unwrap_or((SELF_TAG, url))
}
