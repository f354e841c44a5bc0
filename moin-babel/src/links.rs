//! Link and reference rewrites
//!
//! 1.6 uses `[[target|text]]` for links, `{{target|text}}` for embedded content and
//! `<<Macro>>` for macros, where 1.5 had a mix of bracket forms. Every handler here
//! returns some text: unknown tags and malformed fragments come back unchanged.

use crate::grammar::patterns::{ATTACHMENT_SCHEMES, WIKI_SCHEME};
use crate::grammar::Grammar;
use crate::interwiki::{split_wiki, InterwikiMap};
use crate::naming::{self, caption_from_name, is_picture, is_relative, url_unquote};
use crate::resolver::Resolver;
use crate::store::PageStore;

/// `|text`, or nothing for empty text
fn pipe(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("|{text}")
    }
}

fn scheme_of(url: &str) -> &str {
    url.split_once(':').map_or(url, |(scheme, _)| scheme)
}

fn is_attachment_scheme(scheme: &str) -> bool {
    ATTACHMENT_SCHEMES.contains(&scheme)
}

/// Splits on the first run of whitespace, dropping the whitespace
fn split_first_whitespace(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}

/// `[[Name(args)]]` to `<<Name(args)>>`
pub fn macro_call(word: &str) -> String {
    let inner = word
        .strip_prefix("[[")
        .and_then(|rest| rest.strip_suffix("]]"))
        .unwrap_or(word);
    format!("<<{inner}>>")
}

/// Rewrites the references of one page
pub struct LinkRewriter<'a> {
    resolver: Resolver<'a>,
    interwiki: &'a InterwikiMap,
    store: &'a dyn PageStore,
    grammar: &'a Grammar,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(
        resolver: Resolver<'a>,
        interwiki: &'a InterwikiMap,
        store: &'a dyn PageStore,
        grammar: &'a Grammar,
    ) -> Self {
        LinkRewriter {
            resolver,
            interwiki,
            store,
            grammar,
        }
    }

    /// `["page name"]` to `[[page name]]`
    pub fn wikiname_bracket(&self, word: &str) -> String {
        let name = word
            .strip_prefix("[\"")
            .and_then(|rest| rest.strip_suffix("\"]"))
            .unwrap_or("");
        if name.is_empty() {
            return word.to_string();
        }
        format!("[[{}]]", self.resolver.resolve_page(name))
    }

    /// Bare `Tag:Page` references
    pub fn bare_interwiki(&self, word: &str) -> String {
        let Some((tag, page)) = word.split_once(':') else {
            return word.to_string();
        };
        if !self.interwiki.contains(tag) {
            return word.to_string();
        }
        // %20 was a common way to write blanks
        let page = url_unquote(page);
        if self.interwiki.is_local(tag) {
            let page = self.resolver.resolve_page(&page);
            if naming::is_strict_wikiname(&page) {
                page
            } else {
                format!("[[{page}]]")
            }
        } else if page.contains(' ') {
            format!("[[{tag}:{page}]]")
        } else {
            format!("{tag}:{page}")
        }
    }

    /// `wiki:` links, with optional link text
    pub fn interwiki(&self, url: &str, text: &str) -> String {
        let text = pipe(text);
        let target = url.split_once(':').map_or("", |(_, target)| target);
        let (tag, tail) = split_wiki(target);

        let local_page = if is_relative(target) {
            Some(target)
        } else if self.interwiki.is_local(tag) {
            Some(tail)
        } else if self.is_existing_page(target) {
            Some(target)
        } else {
            None
        };
        if let Some(page) = local_page {
            let page = self.resolver.resolve_target(&url_unquote(page));
            return format!("[[{page}{text}]]");
        }

        let tail = url_unquote(tail);
        if is_picture(&tail) {
            format!("{{{{{tag}:{tail}{text}}}}}")
        } else {
            format!("[[{tag}:{tail}{text}]]")
        }
    }

    /// Whether `target`, as written on the current page, names a page of this wiki
    fn is_existing_page(&self, target: &str) -> bool {
        let current = self.resolver.current_page();
        [target.to_string(), url_unquote(target)]
            .iter()
            .any(|name| self.store.exists(&self.store.resolve_absolute(current, name)))
    }

    /// `attachment:`, `inline:` and `drawing:` references, with optional text
    pub fn attachment(&self, url: &str, text: &str) -> String {
        let (scheme, path) = url.split_once(':').unwrap_or(("attachment", url));
        let current = self.resolver.current_page();
        let (page, file) = naming::split_attachment(current, path);

        let file = self.resolver.resolve_file(&page, &file);
        let name = if page == current {
            file
        } else {
            format!("{}/{file}", self.resolver.resolve_page(&page))
        };

        if scheme == "drawing" {
            return format!("{{{{drawing:{name}{}}}}}", pipe(text));
        }
        if is_picture(&name) {
            let caption = if text.is_empty() {
                caption_from_name(&name)
            } else {
                text.to_string()
            };
            return format!("{{{{attachment:{name}{}}}}}", pipe(&caption));
        }
        if scheme == "inline" {
            format!("{{{{attachment:{name}{}}}}}", pipe(text))
        } else {
            format!("[[attachment:{name}{}]]", pipe(text))
        }
    }

    /// Bare URLs
    pub fn url(&self, word: &str) -> String {
        let scheme = scheme_of(word);
        if scheme == WIKI_SCHEME {
            return self.interwiki(word, "");
        }
        if is_attachment_scheme(scheme) {
            return self.attachment(word, "");
        }
        if is_picture(word) {
            return format!("{{{{{word}|{}}}}}", caption_from_name(word));
        }
        word.to_string()
    }

    /// `[url text]`, `[:page:text]` and `[#anchor text]`
    pub fn url_bracket(&self, word: &str) -> String {
        let inner = word
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(word);

        if let Some(rest) = inner.strip_prefix(':') {
            let (link, text) = rest.split_once(':').unwrap_or((rest, ""));
            let text = if link.trim() == text.trim() { "" } else { text };
            let link = self.resolver.resolve_target(link);
            return format!("[[{link}{}]]", pipe(text));
        }

        let (target, desc) = split_first_whitespace(inner);
        if target.starts_with('#') {
            let desc = if target.trim() == desc.trim() { "" } else { desc };
            return format!("[[{target}{}]]", pipe(desc));
        }

        let scheme = scheme_of(target);
        if scheme == WIKI_SCHEME {
            return self.interwiki(target, desc);
        }
        if is_attachment_scheme(scheme) {
            return self.attachment(target, desc);
        }
        if is_picture(desc) && self.grammar.is_url(desc) {
            return format!("[[{target}|{{{{{desc}}}}}]]");
        }
        format!("[[{target}{}]]", pipe(desc))
    }
}
