//! Rule grammar for the 1.5 markup dialect
//!
//!     The grammar is one ordered alternation of named groups, one per [`Rule`]. Several
//!     rules overlap on purpose (a CamelCase word inside a bracketed URL, `{{{` as inline
//!     teletype, processor start or pre marker), so the order in [`Rule::ORDER`] decides
//!     which one wins when two could match at the same position: first listed wins.
//!
//!     Two patterns are built: the full grammar used for normal text and the verbatim
//!     grammar used inside `{{{ ... }}}` blocks, which only recognises the closing marker.
//!
//!     Building is a pure function of [`GrammarConfig`]. A grammar never changes after
//!     [`Grammar::build`] and can be shared between threads converting different pages.

pub mod patterns;

use fancy_regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::dispatch::{classify, MatchEvent};
use crate::error::ConvertError;
use crate::macros::MacroRegistry;
use crate::scanner::scan_line;

/// One rewrite kind of the 1.5 dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    /// `!` followed by a wiki word, only with bang meta enabled
    NotWord,
    EntNumeric,
    EmphIbb,
    EmphIbi,
    EmphIbOrBi,
    Emph,
    Underline,
    Sup,
    Sub,
    Tt,
    Processor,
    Pre,
    Small,
    Big,
    Strike,
    Remark,
    HorizontalRule,
    Comment,
    Macro,
    OrderedList,
    DefinitionList,
    BulletList,
    NoneList,
    Indent,
    TableEnd,
    Table,
    Heading,
    Interwiki,
    Word,
    UrlBracket,
    Url,
    Email,
    Smiley,
    SmileyAtStart,
    EntSymbolic,
    Ent,
    WikinameBracket,
    TtBacktick,
}

impl Rule {
    /// Tie-break order of the full grammar. [`Rule::NotWord`] is prepended when enabled.
    pub const ORDER: &'static [Rule] = &[
        Rule::EntNumeric,
        Rule::EmphIbb,
        Rule::EmphIbi,
        Rule::EmphIbOrBi,
        Rule::Emph,
        Rule::Underline,
        Rule::Sup,
        Rule::Sub,
        Rule::Tt,
        Rule::Processor,
        Rule::Pre,
        Rule::Small,
        Rule::Big,
        Rule::Strike,
        Rule::Remark,
        Rule::HorizontalRule,
        Rule::Comment,
        Rule::Macro,
        Rule::OrderedList,
        Rule::DefinitionList,
        Rule::BulletList,
        Rule::NoneList,
        Rule::Indent,
        Rule::TableEnd,
        Rule::Table,
        Rule::Heading,
        Rule::Interwiki,
        Rule::Word,
        Rule::UrlBracket,
        Rule::Url,
        Rule::Email,
        Rule::Smiley,
        Rule::SmileyAtStart,
        Rule::EntSymbolic,
        Rule::Ent,
        Rule::WikinameBracket,
        Rule::TtBacktick,
    ];

    /// Name of the capture group wrapping this rule's pattern
    pub fn group_name(self) -> &'static str {
        match self {
            Rule::NotWord => "notword",
            Rule::EntNumeric => "ent_numeric",
            Rule::EmphIbb => "emph_ibb",
            Rule::EmphIbi => "emph_ibi",
            Rule::EmphIbOrBi => "emph_ib_or_bi",
            Rule::Emph => "emph",
            Rule::Underline => "u",
            Rule::Sup => "sup",
            Rule::Sub => "sub",
            Rule::Tt => "tt",
            Rule::Processor => "processor",
            Rule::Pre => "pre",
            Rule::Small => "small",
            Rule::Big => "big",
            Rule::Strike => "strike",
            Rule::Remark => "remark",
            Rule::HorizontalRule => "rule",
            Rule::Comment => "comment",
            Rule::Macro => "macro",
            Rule::OrderedList => "ol",
            Rule::DefinitionList => "dl",
            Rule::BulletList => "li",
            Rule::NoneList => "li_none",
            Rule::Indent => "indent",
            Rule::TableEnd => "tableZ",
            Rule::Table => "table",
            Rule::Heading => "heading",
            Rule::Interwiki => "interwiki",
            Rule::Word => "word",
            Rule::UrlBracket => "url_bracket",
            Rule::Url => "url",
            Rule::Email => "email",
            Rule::Smiley => "smiley",
            Rule::SmileyAtStart => "smileyA",
            Rule::EntSymbolic => "ent_symbolic",
            Rule::Ent => "ent",
            Rule::WikinameBracket => "wikiname_bracket",
            Rule::TtBacktick => "tt_bt",
        }
    }
}

/// Inputs of grammar construction
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarConfig {
    /// Treat `!WikiWord` as an escaped word
    pub bang_meta: bool,
    /// Macro names recognised in `[[Name(args)]]`
    pub macro_names: Vec<String>,
    /// URL schemes recognised in addition to the standard ones
    pub extra_url_schemes: Vec<String>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            bang_meta: true,
            macro_names: MacroRegistry::default().names(),
            extra_url_schemes: Vec::new(),
        }
    }
}

/// Backtracking budget of one search. Lines have no length limit, so neither does this.
const BACKTRACK_LIMIT: usize = usize::MAX;

fn compile(source: &str) -> Result<Regex, ConvertError> {
    RegexBuilder::new(source)
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
        .map_err(|err| ConvertError::InvalidGrammar(err.to_string()))
}

/// A compiled alternation and the rules it was built from, in order
#[derive(Debug)]
pub struct Pattern {
    regex: Regex,
    rules: Vec<Rule>,
}

impl Pattern {
    fn compile(fragments: Vec<(Rule, String)>) -> Result<Self, ConvertError> {
        let source = fragments
            .iter()
            .map(|(rule, fragment)| format!("(?P<{}>{fragment})", rule.group_name()))
            .collect::<Vec<_>>()
            .join("|");
        let regex = compile(&source)?;
        Ok(Pattern {
            regex,
            rules: fragments.into_iter().map(|(rule, _)| rule).collect(),
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Rules in tie-break order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// The compiled 1.5 grammar
#[derive(Debug)]
pub struct Grammar {
    config: GrammarConfig,
    full: Pattern,
    verbatim: Pattern,
    url: Regex,
    eol: regex::Regex,
}

impl Grammar {
    pub fn build(config: &GrammarConfig) -> Result<Self, ConvertError> {
        let mut fragments = Vec::with_capacity(Rule::ORDER.len() + 1);
        if config.bang_meta {
            fragments.push((
                Rule::NotWord,
                patterns::fragment(Rule::NotWord, &config.macro_names, &config.extra_url_schemes),
            ));
        }
        let has_macros = config.macro_names.iter().any(|name| !name.is_empty());
        for &rule in Rule::ORDER {
            if rule == Rule::Macro && !has_macros {
                continue;
            }
            fragments.push((
                rule,
                patterns::fragment(rule, &config.macro_names, &config.extra_url_schemes),
            ));
        }
        let full = Pattern::compile(fragments)?;
        let verbatim = Pattern::compile(vec![(Rule::Pre, r"\}\}\}".to_string())])?;

        let url_source = format!("^(?:{})", patterns::url_rule(&config.extra_url_schemes));
        let url = compile(&url_source)?;
        let eol = regex::Regex::new(r"\r?\n")
            .map_err(|err| ConvertError::InvalidGrammar(err.to_string()))?;

        Ok(Grammar {
            config: config.clone(),
            full,
            verbatim,
            url,
            eol,
        })
    }

    /// Builds a grammar identical to this one except for the bang meta setting
    pub fn with_bang_meta(&self, bang_meta: bool) -> Result<Self, ConvertError> {
        Grammar::build(&GrammarConfig {
            bang_meta,
            ..self.config.clone()
        })
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    pub fn bang_meta(&self) -> bool {
        self.config.bang_meta
    }

    /// The pattern to scan with: the verbatim grammar inside a pre block
    pub fn pattern(&self, in_pre: bool) -> &Pattern {
        if in_pre {
            &self.verbatim
        } else {
            &self.full
        }
    }

    /// Whether `text` starts with a URL the grammar would recognise
    ///
    /// A failing search counts as no URL; the text is then kept as written.
    pub fn is_url(&self, text: &str) -> bool {
        match self.url.is_match(text) {
            Ok(found) => found,
            Err(err) => {
                debug!(error = %err, text, "url check failed");
                false
            }
        }
    }

    /// Splits `text` into `(line, terminator)` pairs. A last line without terminator
    /// pairs with `""`; nothing follows a final terminator.
    pub fn split_lines<'t>(&self, text: &'t str) -> Vec<(&'t str, &'t str)> {
        let mut lines = Vec::new();
        let mut start = 0;
        for eol in self.eol.find_iter(text) {
            lines.push((&text[start..eol.start()], eol.as_str()));
            start = eol.end();
        }
        if start < text.len() {
            lines.push((&text[start..], ""));
        }
        lines
    }

    /// Every match the scanner would see on `line`, with the rule it routes to
    pub fn matches<'t>(
        &self,
        line: &'t str,
        in_pre: bool,
    ) -> Result<Vec<MatchEvent<'t>>, ConvertError> {
        let pattern = self.pattern(in_pre);
        let mut events = Vec::new();
        scan_line(pattern.regex(), line, |captures| {
            let event = classify(pattern, captures)?;
            events.push(event);
            Ok(event.text.to_string())
        })?;
        Ok(events)
    }
}
