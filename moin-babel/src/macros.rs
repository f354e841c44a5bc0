//! Macro registry for grammar construction
//!
//! The macro rule only recognises `[[Name(...)]]` when `Name` is a known macro, otherwise
//! `[[...]]` stays plain text. The registry holds the built-in names plus the macros a site
//! installed as plugins.

use std::collections::BTreeSet;

/// Macros built into the 1.5 wiki engine
pub const BUILTIN_MACROS: &[&str] = &[
    "TitleSearch",
    "WordIndex",
    "TitleIndex",
    "GoTo",
    "InterWiki",
    "PageCount",
    "UserPreferences",
    "Icon",
    "PageList",
    "Date",
    "DateTime",
    "Anchor",
    "MailTo",
    "GetVal",
    "TemplateList",
];

/// Macros shipped as standard plugins
pub const PLUGIN_MACROS: &[&str] = &[
    "TableOfContents",
    "Include",
    "FullSearch",
    "FullSearchCached",
    "RecentChanges",
    "SystemInfo",
    "Navigation",
    "AttachList",
    "AttachInfo",
    "BR",
    "FootNote",
    "PageSize",
    "RandomPage",
    "RandomQuote",
    "OrphanedPages",
    "WantedPages",
    "AbandonedPages",
    "LikePages",
    "MonthCalendar",
    "NewPage",
    "EditTemplates",
    "EditedSystemPages",
    "EmbedObject",
    "ImageLink",
    "GetText",
    "PageHits",
    "ShowSmileys",
    "StatsChart",
    "SystemAdmin",
    "Action",
    "Verbatim",
    "TeudView",
];

/// Registry of macro names
///
/// # Examples
///
/// ```ignore
/// let mut registry = MacroRegistry::default();
/// registry.register("MyMacro");
/// assert!(registry.has("MyMacro"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MacroRegistry {
    names: BTreeSet<String>,
}

impl MacroRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        MacroRegistry {
            names: BTreeSet::new(),
        }
    }

    /// Register a macro name. Registering twice is a no-op.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.names.insert(name);
        }
    }

    /// Register several site extension macros
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.register(name);
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// All known names, sorted
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        let mut registry = MacroRegistry::new();
        registry.extend(BUILTIN_MACROS.iter().copied());
        registry.extend(PLUGIN_MACROS.iter().copied());
        registry
    }
}
