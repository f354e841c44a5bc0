//! Line scanner
//!
//! Finds every match of a pattern in one line, leftmost first and non-overlapping, and
//! splices the rewrite of each match between the untouched spans around it.

use fancy_regex::{Captures, Regex};

use crate::error::ConvertError;

/// Rewrites `line` match by match. No line terminator is appended.
pub fn scan_line<'t, F>(regex: &Regex, line: &'t str, mut rewrite: F) -> Result<String, ConvertError>
where
    F: FnMut(&Captures<'t>) -> Result<String, ConvertError>,
{
    let mut result = String::with_capacity(line.len());
    let mut last = 0;
    for captures in regex.captures_iter(line) {
        let captures = captures?;
        let Some(whole) = captures.get(0) else {
            continue;
        };
        result.push_str(&line[last..whole.start()]);
        result.push_str(&rewrite(&captures)?);
        last = whole.end();
    }
    result.push_str(&line[last..]);
    Ok(result)
}
