//! Whole page conversions, checked with inline snapshots

use insta::assert_snapshot;
use moin_babel::{RenameKey, RenameMap};

use crate::common::TestWiki;

#[test]
fn test_kitchensink_page() {
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("release notes"), "Release Notes");
    renames.insert(RenameKey::file("CurrentPage", "shot 1.png"), "screenshot.png");

    let source = [
        "## page written for 1.5",
        "#format wiki",
        "#language en",
        "[[TableOfContents]]",
        "= Overview =",
        "See [\"release_notes\"] and [:FrontPage:the front page].",
        " * attachment:shot%201.png",
        " * [http://example.org/ upstream]",
        "{{{",
        "[\"release_notes\"] stays as written",
        "}}}",
        "Ask on MoinMoin:HelpContents or mail dev@example.org",
    ]
    .join("\n");

    let wiki = TestWiki::new();
    let output = wiki.convert("CurrentPage", &source, &renames);
    assert_snapshot!(output, @r###"
    ## page written for 1.5
    #format wiki
    #language en
    <<TableOfContents>>
    = Overview =
    See [[Release Notes]] and [[FrontPage|the front page]].
     * {{attachment:screenshot.png|screenshot}}
     * [[http://example.org/|upstream]]
    {{{
    ["release_notes"] stays as written
    }}}
    Ask on MoinMoin:HelpContents or mail dev@example.org
    "###);
}

#[test]
fn test_subpage_links() {
    let mut renames = RenameMap::new();
    renames.insert(RenameKey::page("Projects/Alpha/old_plan"), "Projects/Alpha/Plan");
    renames.insert(RenameKey::page("Projects/Beta"), "Projects/Gamma");

    let source = [
        "[\"/old_plan\"]",
        "[\"../Beta\"]",
        "[wiki:/old_plan the plan]",
        "[:../Beta:sister project]",
    ]
    .join("\n");

    let wiki = TestWiki::new();
    let output = wiki.convert("Projects/Alpha", &source, &renames);
    assert_snapshot!(output, @r###"
    [[/Plan]]
    [[../Gamma]]
    [[/Plan|the plan]]
    [[../Gamma|sister project]]
    "###);
}
