//! Rewrite dispatch
//!
//! Every match carries exactly one rule group. [`classify`] finds it and the
//! [`Dispatcher`] routes it to the rewrite for that rule. A match with no rule group, or
//! more than one, means the grammar was assembled wrongly and aborts the conversion.

use fancy_regex::Captures;
use tracing::trace;

use crate::converter::ConverterState;
use crate::error::ConvertError;
use crate::grammar::{Pattern, Rule};
use crate::links::{self, LinkRewriter};

/// One match, tagged with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent<'t> {
    pub rule: Rule,
    pub text: &'t str,
}

impl MatchEvent<'_> {
    /// Whether a verbatim block is open after this match, given whether one was open before
    pub fn pre_after(&self, in_pre: bool) -> bool {
        match self.rule {
            Rule::Pre => match self.text.trim() {
                "{{{" => true,
                "}}}" => false,
                _ => in_pre,
            },
            Rule::Processor => true,
            _ => in_pre,
        }
    }
}

/// Determine which rule of `pattern` produced `captures`
pub fn classify<'t>(pattern: &Pattern, captures: &Captures<'t>) -> Result<MatchEvent<'t>, ConvertError> {
    let mut hits = pattern.rules().iter().filter_map(|&rule| {
        captures
            .name(rule.group_name())
            .filter(|found| !found.as_str().is_empty())
            .map(|found| MatchEvent {
                rule,
                text: found.as_str(),
            })
    });
    match (hits.next(), hits.next()) {
        (Some(event), None) => Ok(event),
        _ => Err(dispatch_error(pattern, captures)),
    }
}

fn dispatch_error(pattern: &Pattern, captures: &Captures<'_>) -> ConvertError {
    let matched = captures
        .get(0)
        .map(|whole| whole.as_str().to_string())
        .unwrap_or_default();
    let captures = pattern
        .regex()
        .capture_names()
        .flatten()
        .filter_map(|name| {
            captures
                .name(name)
                .map(|found| (name.to_string(), found.as_str().to_string()))
        })
        .collect();
    ConvertError::Dispatch { matched, captures }
}

/// Routes match events to their rewrites
pub struct Dispatcher<'a> {
    links: LinkRewriter<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(links: LinkRewriter<'a>) -> Self {
        Dispatcher { links }
    }

    /// Replacement text for `event`. Pre and processor markers update `state`.
    pub fn dispatch(&self, event: &MatchEvent<'_>, state: &mut ConverterState) -> String {
        let word = event.text;
        let replacement = match event.rule {
            Rule::NotWord
            | Rule::EntNumeric
            | Rule::EmphIbb
            | Rule::EmphIbi
            | Rule::EmphIbOrBi
            | Rule::Emph
            | Rule::Underline
            | Rule::Sup
            | Rule::Sub
            | Rule::Tt
            | Rule::Small
            | Rule::Big
            | Rule::Strike
            | Rule::Remark
            | Rule::HorizontalRule
            | Rule::Comment
            | Rule::OrderedList
            | Rule::DefinitionList
            | Rule::BulletList
            | Rule::NoneList
            | Rule::Indent
            | Rule::TableEnd
            | Rule::Table
            | Rule::Heading
            | Rule::Word
            | Rule::Email
            | Rule::Smiley
            | Rule::SmileyAtStart
            | Rule::EntSymbolic
            | Rule::Ent
            | Rule::TtBacktick => word.to_string(),
            Rule::Macro => links::macro_call(word),
            Rule::WikinameBracket => self.links.wikiname_bracket(word),
            Rule::Interwiki => self.links.bare_interwiki(word),
            Rule::Url => self.links.url(word),
            Rule::UrlBracket => self.links.url_bracket(word),
            Rule::Pre | Rule::Processor => {
                state.in_pre = event.pre_after(state.in_pre);
                word.to_string()
            }
        };
        if replacement != word {
            trace!(rule = event.rule.group_name(), from = word, to = %replacement, "rewrite");
        }
        replacement
    }
}
