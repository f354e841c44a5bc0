//! Wiki markup migration from the MoinMoin 1.5 dialect to 1.6
//!
//!     This crate rewrites page text written in the 1.5 markup so that it means the same
//!     thing under the 1.6 markup, and renames page and attachment references on the way,
//!     following a rename map produced by an earlier migration step.
//!
//!     This is a pure lib, that is, it powers moin-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std print, env vars etc. Pages come in
//!     and go out as strings, the [`store::PageStore`] trait is the only storage boundary.
//!
//! Architecture
//!
//!     Document Converter → Line Scanner → Rewrite Dispatcher → Reference Resolver
//!
//!     The grammar is built once from a [`grammar::GrammarConfig`] and shared by every page
//!     of a run. The converter splits a page into lines and keeps the per run state (leading
//!     processing instructions, verbatim blocks); the scanner finds rule matches on one
//!     line; the dispatcher picks the rewrite for the rule that fired; the resolver maps
//!     old page and attachment names to new ones.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── grammar
//!     │   ├── mod.rs              # Rule enum, ordered alternation, Grammar
//!     │   └── patterns.rs         # pattern fragments per rule
//!     ├── scanner.rs              # per line match/splice loop
//!     ├── dispatch.rs             # rule classification and routing
//!     ├── links.rs                # link, attachment and macro rewrites
//!     ├── resolver.rs             # rename lookups with relative name handling
//!     ├── converter.rs            # the per page state machine
//!     ├── migrate.rs              # batch driver over a page store
//!     ├── naming.rs, rename.rs, interwiki.rs, macros.rs, store.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── convert
//!         └── <topic>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included from tests/lib.rs.

pub mod converter;
pub mod dispatch;
pub mod error;
pub mod grammar;
pub mod interwiki;
pub mod links;
pub mod macros;
pub mod migrate;
pub mod naming;
pub mod rename;
pub mod resolver;
pub mod scanner;
pub mod store;

pub use converter::{ConversionRequest, Converter, ConverterState};
pub use dispatch::MatchEvent;
pub use error::ConvertError;
pub use grammar::{Grammar, GrammarConfig, Rule};
pub use interwiki::InterwikiMap;
pub use macros::MacroRegistry;
pub use migrate::{migrate_pages, Migration, MigrationReport};
pub use rename::{RenameKey, RenameMap};
pub use store::{MemoryPageStore, PageStore};

/// Everything about the wiki a page is converted for
#[derive(Clone, Copy)]
pub struct Wiki<'a> {
    pub grammar: &'a Grammar,
    pub store: &'a dyn PageStore,
    pub interwiki: &'a InterwikiMap,
}

/// Convert one page of `wiki`
pub fn convert(request: &ConversionRequest<'_>, wiki: &Wiki<'_>) -> Result<String, ConvertError> {
    Converter::new(wiki.grammar, wiki.store, wiki.interwiki).convert(request)
}
