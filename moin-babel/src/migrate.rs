//! Batch migration of a whole page store
//!
//! Converts every page the store lists and writes the result back. A page that fails to
//! read, convert or write is logged and reported; it is never written half converted, and
//! the remaining pages are still migrated.

use serde::Serialize;
use tracing::{info, warn};

use crate::converter::{ConversionRequest, Converter};
use crate::error::ConvertError;
use crate::grammar::Grammar;
use crate::interwiki::InterwikiMap;
use crate::rename::RenameMap;
use crate::store::PageStore;

/// Settings shared by all pages of a migration run
#[derive(Clone, Copy)]
pub struct Migration<'a> {
    pub grammar: &'a Grammar,
    pub interwiki: &'a InterwikiMap,
    pub renames: &'a RenameMap,
    pub bang_meta: bool,
}

/// A page that could not be migrated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedPage {
    pub page: String,
    pub error: String,
}

/// Outcome of a migration run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationReport {
    /// Pages whose text changed
    pub converted: Vec<String>,
    /// Pages written back unchanged
    pub unchanged: Vec<String>,
    pub failed: Vec<FailedPage>,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.unchanged.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Migrate every page of `store`.
///
/// Only failing to list the pages is an error; per page failures end up in the report.
pub fn migrate_pages(
    store: &mut dyn PageStore,
    migration: &Migration<'_>,
) -> Result<MigrationReport, ConvertError> {
    let mut report = MigrationReport::default();
    for name in store.page_names()? {
        match migrate_page(store, migration, &name) {
            Ok(true) => report.converted.push(name),
            Ok(false) => report.unchanged.push(name),
            Err(err) => {
                warn!(page = %name, error = %err, "page migration failed");
                report.failed.push(FailedPage {
                    page: name,
                    error: err.to_string(),
                });
            }
        }
    }
    info!(
        converted = report.converted.len(),
        unchanged = report.unchanged.len(),
        failed = report.failed.len(),
        "migration finished"
    );
    Ok(report)
}

/// Returns whether the page text changed
fn migrate_page(
    store: &mut dyn PageStore,
    migration: &Migration<'_>,
    name: &str,
) -> Result<bool, ConvertError> {
    let original = store.read_page(name)?;
    let converted = {
        let converter = Converter::new(migration.grammar, &*store, migration.interwiki);
        let request = ConversionRequest::new(name, &original, migration.renames)
            .with_bang_meta(migration.bang_meta);
        converter.convert(&request)?
    };
    store.write_page(name, &converted)?;
    Ok(converted != original)
}
