//! Pattern fragments for the 1.5 markup rules
//!
//! Fragments are plain strings combined by [`super::Grammar::build`]. They must only use
//! non-capturing groups: the rule group around each fragment is the only capture the
//! dispatcher looks at (the heading's `hmarker` backreference is the one exception).

use super::Rule;

/// Characters that end a bare URL or interwiki link when followed by whitespace
pub(crate) const PUNCT: &str = r#""'\}\]\|:,\.\)\?!"#;

/// URL schemes recognised in bare and bracketed URLs
pub const URL_SCHEMES: &[&str] = &[
    "http",
    "https",
    "ftp",
    "nntp",
    "news",
    "mailto",
    "telnet",
    "wiki",
    "file",
    "irc",
    "attachment",
    "inline",
    "drawing",
];

/// Schemes that refer to files attached to a page
pub const ATTACHMENT_SCHEMES: &[&str] = &["attachment", "inline", "drawing"];

/// The interwiki link scheme
pub const WIKI_SCHEME: &str = "wiki";

/// Smileys known to the 1.5 dialect
pub const SMILEYS: &[&str] = &[
    "X-(", ":D", "<:(", ":o", ":(", ":)", "B)", ":))", ";)", "/!\\", "<!>", "(!)", ":-?",
    ":\\", ">:>", "|)", ":-(", ":-)", "B-)", ":-))", ";-)", "|-)", "(./)", "{OK}", "{X}",
    "{i}", "{1}", "{2}", "{3}", "{*}", "{o}",
];

const UPPER: &str = r"\p{Lu}";
const LOWER: &str = r"\p{Ll}0-9";

/// A CamelCase page name, optionally with `../` or `/` relative prefixes
pub(crate) fn word_rule() -> String {
    format!(
        r"(?:(?<![{UPPER}{LOWER}])|^)(?:\.\./)?(?:/?(?:[{UPPER}][{LOWER}]+){{2,}})+(?![{UPPER}{LOWER}])"
    )
}

/// Alternation of all URL schemes, longest first so `https` wins over `http`
pub(crate) fn url_schemes(extra: &[String]) -> String {
    let mut schemes: Vec<&str> = URL_SCHEMES.iter().copied().collect();
    schemes.extend(extra.iter().map(String::as_str).filter(|s| !s.is_empty()));
    schemes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    schemes.dedup();
    schemes
        .iter()
        .map(|scheme| fancy_regex::escape(scheme).into_owned())
        .collect::<Vec<_>>()
        .join("|")
}

pub(crate) fn url_rule(extra: &[String]) -> String {
    let schemes = url_schemes(extra);
    format!(r"(?:^|(?<!\w))(?:{schemes}):(?:[^\s<{PUNCT}]|[{PUNCT}][^\s<{PUNCT}])+")
}

fn smiley_alternation() -> String {
    let mut smileys: Vec<&str> = SMILEYS.to_vec();
    smileys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    smileys
        .iter()
        .map(|smiley| fancy_regex::escape(smiley).into_owned())
        .collect::<Vec<_>>()
        .join("|")
}

fn macro_alternation(names: &[String]) -> String {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .map(|name| fancy_regex::escape(name).into_owned())
        .collect::<Vec<_>>()
        .join("|")
}

/// The pattern fragment for one rule
pub(crate) fn fragment(rule: Rule, macro_names: &[String], extra_schemes: &[String]) -> String {
    match rule {
        Rule::NotWord => format!("!{}", word_rule()),
        Rule::EntNumeric => r"&#(?:\d{1,5}|x[0-9a-fA-F]+);".to_string(),
        Rule::EmphIbb => r"'''''(?=[^']+''')".to_string(),
        Rule::EmphIbi => r"'''''(?=[^']+'')".to_string(),
        Rule::EmphIbOrBi => r"'{5}(?=[^'])".to_string(),
        Rule::Emph => r"'{2,3}".to_string(),
        Rule::Underline => r"__".to_string(),
        Rule::Sup => r"\^.*?\^".to_string(),
        Rule::Sub => r",,[^,]{1,40},,".to_string(),
        Rule::Tt => r"\{\{\{.*?\}\}\}".to_string(),
        Rule::Processor => r"\{\{\{(?:#!.*|\s*$)".to_string(),
        Rule::Pre => r"\{\{\{ ?|\}\}\}".to_string(),
        Rule::Small => r"~- ?|-~".to_string(),
        Rule::Big => r"~\+ ?|\+~".to_string(),
        Rule::Strike => r"--\(|\)--".to_string(),
        Rule::Remark => r"/\* ?| ?\*/".to_string(),
        Rule::HorizontalRule => r"-{4,}".to_string(),
        Rule::Comment => r"^##.*$".to_string(),
        Rule::Macro => format!(
            r"\[\[(?:{})(?:\(.*?\))?\]\]",
            macro_alternation(macro_names)
        ),
        Rule::OrderedList => r"^\s+(?:[0-9]+|[aAiI])\.(?:#\d+)?\s".to_string(),
        Rule::DefinitionList => r"^\s+.*?::\s".to_string(),
        Rule::BulletList => r"^\s+\*\s*".to_string(),
        Rule::NoneList => r"^\s+\.\s*".to_string(),
        Rule::Indent => r"^\s+".to_string(),
        Rule::TableEnd => r"\|\| $".to_string(),
        Rule::Table => r"(?:\|\|)+(?:<[^>]*?>)?(?!\|? $)".to_string(),
        Rule::Heading => r"^\s*(?P<hmarker>=+)\s.*\s\k<hmarker> $".to_string(),
        Rule::Interwiki => format!(
            r#"[A-Z][a-zA-Z]+:[^\s'":<\|](?:[^\s{PUNCT}]|[{PUNCT}][^\s{PUNCT}])+"#
        ),
        Rule::Word => word_rule(),
        Rule::UrlBracket => format!(
            r"\[(?:(?:{}):|#|:)[^\s\]]+(?:\s[^\]]+)?\]",
            url_schemes(extra_schemes)
        ),
        Rule::Url => url_rule(extra_schemes),
        Rule::Email => r"[-\w._+]+@[\w-]+(?:\.[\w-]+)+".to_string(),
        Rule::Smiley => format!(r"(?<=\s)(?:{})(?=\s)", smiley_alternation()),
        Rule::SmileyAtStart => format!(r"^(?:{})(?=\s)", smiley_alternation()),
        Rule::EntSymbolic => r"&[a-zA-Z]+;".to_string(),
        Rule::Ent => r"[<>&]".to_string(),
        Rule::WikinameBracket => r#"\[".*?"\]"#.to_string(),
        Rule::TtBacktick => r"`.*?`".to_string(),
    }
}
