//! Document converter
//!
//!     Drives one page through the grammar, line by line:
//!
//!     - Leading processing instructions (`#format`, `#acl`, `##` comments, ...) are copied
//!       untouched. The first line that is neither blank nor a directive ends that block
//!       for good; blank lines inside it do not.
//!     - Blank lines are always copied untouched.
//!     - Every other line is scanned with the full grammar, or with the verbatim grammar
//!       while inside a `{{{ ... }}}` block. Pre markers found on a line only change the
//!       grammar used for the following lines.
//!
//!     Every line keeps the terminator it had in the input (`\n` or `\r\n`), so a
//!     last line without one stays without one.

use tracing::debug;

use crate::dispatch::{classify, Dispatcher};
use crate::error::ConvertError;
use crate::grammar::Grammar;
use crate::interwiki::InterwikiMap;
use crate::links::LinkRewriter;
use crate::rename::RenameMap;
use crate::resolver::Resolver;
use crate::scanner::scan_line;
use crate::store::PageStore;

/// Prefixes of the processing instructions that may open a page
pub const PROCESSING_INSTRUCTIONS: &[&str] = &[
    "##",
    "#format",
    "#refresh",
    "#redirect",
    "#deprecated",
    "#pragma",
    "#form",
    "#acl",
    "#language",
];

/// Whether `line` starts with a processing instruction, ignoring case
pub fn is_processing_instruction(line: &str) -> bool {
    PROCESSING_INSTRUCTIONS.iter().any(|prefix| {
        line.as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
    })
}

/// One page to convert
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    /// Absolute name of the page the text belongs to
    pub page_name: &'a str,
    pub text: &'a str,
    pub renames: &'a RenameMap,
    /// Whether `!WikiWord` escapes a wiki word on the target wiki
    pub bang_meta: bool,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(page_name: &'a str, text: &'a str, renames: &'a RenameMap) -> Self {
        ConversionRequest {
            page_name,
            text,
            renames,
            bang_meta: true,
        }
    }

    pub fn with_bang_meta(mut self, bang_meta: bool) -> Self {
        self.bang_meta = bang_meta;
        self
    }
}

/// Mutable state of a single conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    pub in_pre: bool,
    pub in_processing_instructions: bool,
    pub output: String,
    /// Matches rewritten so far
    pub matches: usize,
}

impl ConverterState {
    pub fn new() -> Self {
        ConverterState {
            in_pre: false,
            in_processing_instructions: true,
            output: String::new(),
            matches: 0,
        }
    }
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts pages of one wiki
pub struct Converter<'a> {
    grammar: &'a Grammar,
    store: &'a dyn PageStore,
    interwiki: &'a InterwikiMap,
}

impl<'a> Converter<'a> {
    pub fn new(grammar: &'a Grammar, store: &'a dyn PageStore, interwiki: &'a InterwikiMap) -> Self {
        Converter {
            grammar,
            store,
            interwiki,
        }
    }

    /// Convert one page. Either the whole page converts or an error is returned.
    pub fn convert(&self, request: &ConversionRequest<'_>) -> Result<String, ConvertError> {
        let rebuilt = self.rebuilt_grammar(request.bang_meta)?;
        let grammar = rebuilt.as_ref().unwrap_or(self.grammar);

        let resolver = Resolver::new(request.page_name, request.renames, self.store);
        let dispatcher = Dispatcher::new(LinkRewriter::new(
            resolver,
            self.interwiki,
            self.store,
            grammar,
        ));

        let lines = grammar.split_lines(request.text);
        let mut state = ConverterState::new();
        state.output.reserve(request.text.len());
        for (line, eol) in &lines {
            convert_line(grammar, &dispatcher, &mut state, line)?;
            state.output.push_str(eol);
        }
        debug!(
            page = request.page_name,
            lines = lines.len(),
            matches = state.matches,
            "converted page"
        );
        Ok(state.output)
    }

    /// A grammar for `bang_meta`, or `None` when the shared one already fits
    fn rebuilt_grammar(&self, bang_meta: bool) -> Result<Option<Grammar>, ConvertError> {
        if bang_meta == self.grammar.bang_meta() {
            Ok(None)
        } else {
            self.grammar.with_bang_meta(bang_meta).map(Some)
        }
    }
}

fn convert_line(
    grammar: &Grammar,
    dispatcher: &Dispatcher<'_>,
    state: &mut ConverterState,
    line: &str,
) -> Result<(), ConvertError> {
    let blank = line.trim().is_empty();
    if state.in_processing_instructions {
        if blank || is_processing_instruction(line) {
            state.output.push_str(line);
            return Ok(());
        }
        state.in_processing_instructions = false;
    }
    if blank {
        state.output.push_str(line);
        return Ok(());
    }

    let pattern = grammar.pattern(state.in_pre);
    let mut matches = 0;
    let rewritten = scan_line(pattern.regex(), line, |captures| {
        let event = classify(pattern, captures)?;
        matches += 1;
        Ok(dispatcher.dispatch(&event, state))
    })?;
    state.matches += matches;
    state.output.push_str(&rewritten);
    Ok(())
}
