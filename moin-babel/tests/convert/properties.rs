//! Behavioural guarantees of a conversion run

use moin_babel::{RenameKey, RenameMap};
use proptest::prelude::*;

use crate::common::TestWiki;

#[test]
fn test_pass_through_markup_is_unchanged() {
    let wiki = TestWiki::new();
    let text = [
        "= Heading =",
        "''emphasis'' and '''strong''' and __underline__",
        "--(strike)-- ^sup^ ,,sub,, ~-small-~ ~+big+~",
        "{{{inline code}}} and `backticks`",
        "&amp; &#8364; < > &",
        "||cell||cell||",
        " * bullet",
        " 1. ordered",
        " term:: definition",
        "----",
        "FrontPage and user@example.org :-) ok",
        "",
    ]
    .join("\n");
    assert_eq!(wiki.convert("CurrentPage", &text, &RenameMap::new()), text);
}

#[test]
fn test_page_rename_with_underscores() {
    let wiki = TestWiki::new();
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("some page"), "Some Page");
    assert_eq!(
        wiki.convert("CurrentPage", "[\"some_page\"]", &renames),
        "[[Some Page]]"
    );
}

#[test]
fn test_attachment_with_blank() {
    let wiki = TestWiki::new();
    let mut renames = RenameMap::new();
    renames.insert(
        RenameKey::file("CurrentPage", "with blank.txt"),
        "with blank.txt",
    );
    assert_eq!(
        wiki.convert("CurrentPage", "attachment:with%20blank.txt", &renames),
        "[[attachment:with blank.txt]]"
    );
}

#[test]
fn test_leading_directives_are_preserved() {
    let wiki = TestWiki::new();
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("a page"), "A Page");
    let text = "#format wiki\n#acl All:read\nSome *bold* text [\"a_page\"]";
    assert_eq!(
        wiki.convert("CurrentPage", text, &renames),
        "#format wiki\n#acl All:read\nSome *bold* text [[A Page]]"
    );
}

#[test]
fn test_directives_only_at_the_start() {
    let wiki = TestWiki::new();
    let text = "#FORMAT wiki\n## a comment\nText\n#pragma section-numbers off";
    // `#pragma` after body text is ordinary text and is scanned (no rule matches it)
    assert_eq!(wiki.convert("CurrentPage", text, &RenameMap::new()), text);
}

#[test]
fn test_verbatim_blocks_are_not_rewritten() {
    let wiki = TestWiki::new();
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("a page"), "A Page");
    let text = "{{{\n[\"a_page\"]\n}}}";
    assert_eq!(wiki.convert("CurrentPage", text, &renames), text);
}

#[test]
fn test_processor_blocks_are_not_rewritten() {
    let wiki = TestWiki::new();
    let text = "{{{#!python\nx = [[TableOfContents]]\n}}}\n[[TableOfContents]]\n";
    assert_eq!(
        wiki.convert("CurrentPage", text, &RenameMap::new()),
        "{{{#!python\nx = [[TableOfContents]]\n}}}\n<<TableOfContents>>\n"
    );
}

#[test]
fn test_macro_delimiters() {
    let wiki = TestWiki::new();
    let renames = RenameMap::new();
    assert_eq!(
        wiki.convert("CurrentPage", "[[TableOfContents]]", &renames),
        "<<TableOfContents>>"
    );
    assert_eq!(
        wiki.convert("CurrentPage", "[[Include(OtherPage, , to=\"^----\")]]", &renames),
        "<<Include(OtherPage, , to=\"^----\")>>"
    );
    // Unknown names are not macros
    assert_eq!(
        wiki.convert("CurrentPage", "[[NotAMacro]]", &renames),
        "[[NotAMacro]]"
    );
}

#[test]
fn test_relative_links_keep_their_framing() {
    let wiki = TestWiki::new();
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("Projects/old_beta"), "Projects/Beta");
    renames.insert(RenameKey::page("Projects/Alpha/old notes"), "Projects/Alpha/Notes");
    renames.insert(RenameKey::page("Projects/moved"), "Archive/Moved");
    let text = "[\"../old_beta\"] [\"/old notes\"] [\"../moved\"] [\"../unknown\"]";
    assert_eq!(
        wiki.convert("Projects/Alpha", text, &renames),
        "[[../Beta]] [[/Notes]] [[Archive/Moved]] [[../unknown]]"
    );
}

#[test]
fn test_long_lines_convert() {
    let wiki = TestWiki::new();
    let renames = RenameMap::new();
    let lines = [
        format!("= {} =", "lorem ".repeat(10_000)),
        format!(" {}", "x ".repeat(25_000)),
        format!("^{}", "a".repeat(50_000)),
        "word ".repeat(25_000),
    ];
    for line in &lines {
        let text = format!("{line}\n");
        assert_eq!(wiki.convert("CurrentPage", &text, &renames), text);
    }
}

proptest! {
    #[test]
    fn test_terminator_fidelity_lf(text in "[a-zA-Z ,.]{0,12}(\n[a-zA-Z ,.]{0,12}){0,4}\n?") {
        let wiki = TestWiki::new();
        let output = wiki.convert("CurrentPage", &text, &RenameMap::new());
        prop_assert_eq!(output.ends_with('\n'), text.ends_with('\n'));
        prop_assert_eq!(output, text);
    }

    #[test]
    fn test_terminator_fidelity_crlf(lines in prop::collection::vec("[a-z .]{0,10}", 1..5), terminated in any::<bool>()) {
        let wiki = TestWiki::new();
        let mut text = lines.join("\r\n");
        if terminated {
            text.push_str("\r\n");
        }
        let output = wiki.convert("CurrentPage", &text, &RenameMap::new());
        prop_assert_eq!(output.ends_with("\r\n"), terminated);
        prop_assert_eq!(output, text);
    }
}
