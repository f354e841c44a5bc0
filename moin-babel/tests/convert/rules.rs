//! Every rule of the grammar has an input that routes to it
//!
//! Each sample's first match must be classified as its rule, and no sample may trip the
//! dispatcher's one-rule-per-match check.

use moin_babel::{Grammar, GrammarConfig, Rule};

const SAMPLES: &[(Rule, &str, &str)] = &[
    (Rule::NotWord, "!FrontPage", "!FrontPage"),
    (Rule::EntNumeric, "&#8364;", "&#8364;"),
    (Rule::EmphIbb, "'''''a'''", "'''''"),
    (Rule::EmphIbi, "'''''a''", "'''''"),
    (Rule::EmphIbOrBi, "'''''a", "'''''"),
    (Rule::Emph, "''a''", "''"),
    (Rule::Underline, "__a__", "__"),
    (Rule::Sup, "x^2^", "^2^"),
    (Rule::Sub, "H,,2,,O", ",,2,,"),
    (Rule::Tt, "{{{code}}}", "{{{code}}}"),
    (Rule::Processor, "{{{#!python", "{{{#!python"),
    (Rule::Pre, "{{{ text", "{{{ "),
    (Rule::Small, "~-small-~", "~-"),
    (Rule::Big, "~+big+~", "~+"),
    (Rule::Strike, "--(gone)--", "--("),
    (Rule::Remark, "/* note */", "/* "),
    (Rule::HorizontalRule, "----", "----"),
    (Rule::Comment, "## note", "## note"),
    (Rule::Macro, "[[TableOfContents]]", "[[TableOfContents]]"),
    (Rule::OrderedList, " 1. item", " 1. "),
    (Rule::DefinitionList, " term:: def", " term:: "),
    (Rule::BulletList, " * item", " * "),
    (Rule::NoneList, " . item", " . "),
    (Rule::Indent, "  text", "  "),
    (Rule::TableEnd, "|| ", "|| "),
    (Rule::Table, "||cell", "||"),
    (Rule::Heading, "= Title = ", "= Title = "),
    (Rule::Interwiki, "MoinMoin:FrontPage", "MoinMoin:FrontPage"),
    (Rule::Word, "FrontPage", "FrontPage"),
    (
        Rule::UrlBracket,
        "[http://example.org example]",
        "[http://example.org example]",
    ),
    (Rule::Url, "http://example.org/", "http://example.org/"),
    (Rule::Email, "user@example.org", "user@example.org"),
    (Rule::Smiley, "a :-) b", ":-)"),
    (Rule::SmileyAtStart, ":-) b", ":-)"),
    (Rule::EntSymbolic, "&amp;", "&amp;"),
    (Rule::Ent, "a < b", "<"),
    (Rule::WikinameBracket, "[\"page name\"]", "[\"page name\"]"),
    (Rule::TtBacktick, "`code`", "`code`"),
];

fn grammar() -> Grammar {
    Grammar::build(&GrammarConfig::default()).expect("default grammar")
}

#[test]
fn test_every_rule_has_a_sample() {
    let grammar = grammar();
    for rule in grammar.pattern(false).rules() {
        assert!(
            SAMPLES.iter().any(|(sample_rule, _, _)| sample_rule == rule),
            "no sample for {rule:?}"
        );
    }
}

#[test]
fn test_samples_route_to_their_rule() {
    let grammar = grammar();
    for (rule, line, expected) in SAMPLES {
        let events = grammar
            .matches(line, false)
            .unwrap_or_else(|err| panic!("{line:?} failed to dispatch: {err}"));
        let first = events
            .first()
            .unwrap_or_else(|| panic!("{line:?} did not match"));
        assert_eq!(first.rule, *rule, "sample {line:?}");
        assert_eq!(first.text, *expected, "sample {line:?}");
    }
}

#[test]
fn test_notword_only_with_bang_meta() {
    let grammar = Grammar::build(&GrammarConfig {
        bang_meta: false,
        ..GrammarConfig::default()
    })
    .unwrap();
    let events = grammar.matches("!FrontPage", false).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].rule, Rule::Word);
    assert_eq!(events[0].text, "FrontPage");
}

#[test]
fn test_tie_breaks_follow_rule_order() {
    let grammar = grammar();
    // inline teletype wins over the pre marker
    let events = grammar.matches("{{{x}}}", false).unwrap();
    assert_eq!(events[0].rule, Rule::Tt);
    // the bare interwiki rule wins over the wiki word rule
    let events = grammar.matches("Self:FrontPage", false).unwrap();
    assert_eq!(events[0].rule, Rule::Interwiki);
    // a known macro wins over the bracketed page name rules
    let events = grammar.matches("[[Date]]", false).unwrap();
    assert_eq!(events[0].rule, Rule::Macro);
}
