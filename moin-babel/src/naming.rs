//! Page and attachment naming helpers
//!
//! Page names are hierarchical, `/` separated. A reference may be written relative to the
//! page it appears on:
//!
//! | Written as   | On page `A/B` | Meaning                    |
//! |--------------|---------------|----------------------------|
//! | `Other`      | `Other`       | absolute                   |
//! | `/Sub`       | `A/B/Sub`     | sub page of the current one |
//! | `../Sib`     | `A/Sib`       | one level up per `../`     |

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

pub const PARENT_PREFIX: &str = "../";
pub const CHILD_PREFIX: &str = "/";

const PICTURE_EXTENSIONS: &[&str] = &[".gif", ".jpg", ".jpeg", ".png", ".bmp"];

static STRICT_WIKINAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\p{Lu}[\p{Ll}0-9]+){2,}$").expect("valid regex for strict wiki names")
});

/// Climbs `context` once per leading `../` in `name`.
///
/// Returns the remaining context, the rest of the name and the number of levels climbed.
/// Climbing stops at the root; surplus `../` stay in the returned name.
fn climb<'a>(context: &'a str, name: &'a str) -> (&'a str, &'a str, usize) {
    let mut context = context;
    let mut name = name;
    let mut levels = 0;
    while !context.is_empty() {
        let Some(rest) = name.strip_prefix(PARENT_PREFIX) else {
            break;
        };
        context = context.rsplit_once('/').map_or("", |(parent, _)| parent);
        name = rest;
        levels += 1;
    }
    (context, name, levels)
}

fn join_non_empty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left}/{right}"),
    }
}

/// Whether `name` is written relative to the page it appears on
pub fn is_relative(name: &str) -> bool {
    name.starts_with(PARENT_PREFIX) || name.starts_with(CHILD_PREFIX)
}

/// Returns the absolute page name for a (possibly) relative `name` seen on page `context`.
pub fn abs_page_name(context: &str, name: &str) -> String {
    if name.starts_with(PARENT_PREFIX) {
        let (base, rest, _) = climb(context, name);
        join_non_empty(base, rest)
    } else if let Some(sub) = name.strip_prefix(CHILD_PREFIX) {
        join_non_empty(context, sub)
    } else {
        name.to_string()
    }
}

/// Re-expresses the absolute page name `absolute` with the same relative framing `original`
/// was written in, as seen from page `context`.
///
/// Returns `None` when `original` is absolute or when `absolute` no longer lives below the
/// ancestor the relative form was anchored to.
pub fn reframe_relative(context: &str, original: &str, absolute: &str) -> Option<String> {
    if original.starts_with(PARENT_PREFIX) {
        let (base, _, levels) = climb(context, original);
        if levels == 0 {
            return None;
        }
        let rest = if base.is_empty() {
            absolute
        } else {
            absolute.strip_prefix(base)?.strip_prefix('/')?
        };
        Some(format!("{}{rest}", PARENT_PREFIX.repeat(levels)))
    } else if original.starts_with(CHILD_PREFIX) {
        if context.is_empty() {
            return None;
        }
        let sub = absolute.strip_prefix(context)?.strip_prefix('/')?;
        Some(format!("{CHILD_PREFIX}{sub}"))
    } else {
        None
    }
}

/// Splits an attachment path into `(absolute page, file name)`.
///
/// `file.png` belongs to `current_page`; `Some/Page/file.png` belongs to `Some/Page`.
/// Relative page parts are resolved against `current_page`.
pub fn split_attachment(current_page: &str, path: &str) -> (String, String) {
    let absolute = abs_page_name(current_page, path);
    match absolute.rsplit_once('/') {
        Some((page, file)) => (page.to_string(), file.to_string()),
        None => (current_page.to_string(), absolute),
    }
}

/// Percent-decodes `text`; invalid UTF-8 sequences are replaced.
pub fn url_unquote(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Whether `url` names an image by its extension
pub fn is_picture(url: &str) -> bool {
    match url.rfind('.') {
        Some(pos) if pos > 0 => {
            let extension = url[pos..].to_lowercase();
            PICTURE_EXTENSIONS.contains(&extension.as_str())
        }
        _ => false,
    }
}

/// Whether `name` is a CamelCase word that links by itself, e.g. `FrontPage`
pub fn is_strict_wikiname(name: &str) -> bool {
    STRICT_WIKINAME.is_match(name)
}

/// Caption for an embedded image: the decoded base name without its extension.
pub fn caption_from_name(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    let stem = base.rsplit_once('.').map_or(base, |(stem, _)| stem);
    url_unquote(stem)
}
