//! Link, attachment and interwiki rewrites inside running text

use moin_babel::{RenameKey, RenameMap};

use crate::common::TestWiki;

fn renames() -> RenameMap {
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("some page"), "Some Page");
    renames.insert(RenameKey::page("OldPage"), "New Page");
    renames.insert(RenameKey::file("CurrentPage", "old%20name.png"), "diagram.png");
    renames.insert(RenameKey::file("FrontPage", "logo one.png"), "logo.png");
    renames
}

fn convert(text: &str) -> String {
    TestWiki::new().convert("CurrentPage", text, &renames())
}

#[test]
fn test_local_extended_links() {
    assert_eq!(
        convert("see [:some_page:some text] now"),
        "see [[Some Page|some text]] now"
    );
    assert_eq!(convert("[:page:text]"), "[[page|text]]");
    assert_eq!(convert("[:OldPage:OldPage]"), "[[New Page]]");
}

#[test]
fn test_anchor_links() {
    assert_eq!(convert("[#section Section]"), "[[#section|Section]]");
}

#[test]
fn test_bracketed_urls() {
    assert_eq!(
        convert("[http://example.org/ Example]"),
        "[[http://example.org/|Example]]"
    );
    assert_eq!(
        convert("[http://example.org/ http://example.org/logo.gif]"),
        "[[http://example.org/|{{http://example.org/logo.gif}}]]"
    );
}

#[test]
fn test_bare_urls() {
    assert_eq!(
        convert("visit http://example.org/ today"),
        "visit http://example.org/ today"
    );
    assert_eq!(
        convert("http://example.org/pics/sun%20set.jpg"),
        "{{http://example.org/pics/sun%20set.jpg|sun set}}"
    );
}

#[test]
fn test_wiki_scheme_links() {
    assert_eq!(convert("wiki:Self:OldPage"), "[[New Page]]");
    assert_eq!(convert("[wiki:MyWiki:OldPage the new page]"), "[[New Page|the new page]]");
    assert_eq!(
        convert("[wiki:MoinMoin:HelpContents help]"),
        "[[MoinMoin:HelpContents|help]]"
    );
    assert_eq!(convert("[wiki:Projects/Alpha alpha]"), "[[Projects/Alpha|alpha]]");
}

#[test]
fn test_bare_interwiki_links() {
    assert_eq!(convert("MoinMoin:FrontPage"), "MoinMoin:FrontPage");
    assert_eq!(convert("WikiPedia:Main%20Page"), "[[WikiPedia:Main Page]]");
    assert_eq!(convert("Self:OldPage"), "[[New Page]]");
    assert_eq!(convert("Nowhere:SomePage"), "Nowhere:SomePage");
}

#[test]
fn test_attachments() {
    assert_eq!(
        convert("attachment:old%20name.png"),
        "{{attachment:diagram.png|diagram}}"
    );
    assert_eq!(
        convert("[attachment:FrontPage/logo%20one.png the logo]"),
        "{{attachment:FrontPage/logo.png|the logo}}"
    );
    assert_eq!(
        convert("[attachment:OldPage/report.pdf report]"),
        "[[attachment:New Page/report.pdf|report]]"
    );
    assert_eq!(convert("inline:snippet.py"), "{{attachment:snippet.py}}");
    assert_eq!(convert("drawing:architecture"), "{{drawing:architecture}}");
}

#[test]
fn test_escaped_words_are_kept() {
    assert_eq!(convert("!OldPage stays"), "!OldPage stays");
}
