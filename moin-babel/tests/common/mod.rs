//! Shared fixtures for conversion tests

use moin_babel::{
    convert, ConversionRequest, Grammar, GrammarConfig, InterwikiMap, MemoryPageStore, RenameMap,
    Wiki,
};

/// A wiki with the default grammar, a few existing pages and one remote interwiki tag
pub struct TestWiki {
    pub grammar: Grammar,
    pub store: MemoryPageStore,
    pub interwiki: InterwikiMap,
}

impl TestWiki {
    pub fn new() -> Self {
        let mut interwiki = InterwikiMap::new().with_local_name("MyWiki");
        interwiki.insert("MoinMoin", "http://moinmo.in/");
        interwiki.insert("WikiPedia", "http://en.wikipedia.org/wiki/");
        TestWiki {
            grammar: Grammar::build(&GrammarConfig::default()).expect("default grammar"),
            store: MemoryPageStore::with_names(["FrontPage", "CurrentPage", "Projects/Alpha"]),
            interwiki,
        }
    }

    pub fn convert(&self, page: &str, text: &str, renames: &RenameMap) -> String {
        let wiki = Wiki {
            grammar: &self.grammar,
            store: &self.store,
            interwiki: &self.interwiki,
        };
        convert(&ConversionRequest::new(page, text, renames), &wiki).expect("conversion to succeed")
    }
}
