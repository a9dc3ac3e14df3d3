//! Placeholder extraction for non-translatable spans
//!
//! Before a text is sent to the translation backend, every span that must
//! survive translation unchanged is replaced by a single character from the
//! Unicode Miscellaneous Symbols block (starting at U+2600). The backend
//! passes those characters through untouched, and the reassembler substitutes
//! the original spans back by position.
//!
//! Three kinds of spans are protected:
//!
//! - parameter tokens, e.g. `{[count]}`
//! - tag pairs, e.g. `[b]...[/b]` or `<color=red>...</color>` — only the tags
//!   themselves, the content between them stays translatable
//! - `<i2nt>...</i2nt>` spans, protected whole (tags and content as one unit)

use std::sync::OnceLock;

use regex::Regex;

/// First code point used for placeholder characters.
///
/// The Miscellaneous Symbols block is never touched by the translation
/// backend, which makes it a safe stand-in alphabet. Input text that already
/// contains these code points is not supported (known limitation).
pub const PLACEHOLDER_BASE: u32 = 0x2600;

/// Tag name whose whole span (tags and content) must not be translated.
pub const NO_TRANSLATE_TAG: &str = "i2nt";

/// The placeholder character standing in for the span at `index`.
pub fn placeholder_char(index: usize) -> char {
    char::from_u32(PLACEHOLDER_BASE + index as u32).unwrap_or('\u{FFFD}')
}

fn tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // parameter token | bracket tag | angle-bracket tag
        Regex::new(r"\{\[(.*?)\]\}|\[(.*?)\]|<(.*?)>").expect("tag pattern compiles")
    })
}

#[derive(Debug, Clone)]
struct TagMatch {
    start: usize,
    end: usize,
    /// Inner capture: tag name for tags, parameter name for parameter tokens.
    name: String,
    /// True when the parameter-token alternative matched.
    is_param: bool,
}

fn scan(text: &str) -> Vec<TagMatch> {
    tag_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
            Some(TagMatch {
                start: whole.start(),
                end: whole.end(),
                name: inner.as_str().to_string(),
                is_param: caps.get(1).is_some(),
            })
        })
        .collect()
}

/// Find the closing tag for `name` among the unconsumed matches after `from`.
///
/// A closer carries a leading `/`; `[color=red]` is closed by `[/color]`, so
/// the opener name only has to start with the closer name. A match that is
/// itself a closer never opens anything, and a closer already claimed by an
/// earlier opener cannot close a second pair.
fn find_closing(name: &str, matches: &[TagMatch], consumed: &[bool], from: usize) -> Option<usize> {
    if name.starts_with('/') {
        return None;
    }
    matches
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(i, m)| {
            !consumed[*i]
                && m.name
                    .strip_prefix('/')
                    .is_some_and(|closer| name.starts_with(closer))
        })
        .map(|(i, _)| i)
}

/// Replace every protected span in `text` with a placeholder character.
///
/// Returns the working text and the protected spans in placeholder order.
/// Placeholders are positional: indices are assigned left to right, so the
/// working text contains `spans.len()` placeholder characters, each exactly
/// once, in ascending order.
pub fn extract_spans(text: &str) -> (String, Vec<String>) {
    let matches = scan(text);
    if matches.is_empty() {
        return (text.to_string(), Vec::new());
    }

    let mut consumed = vec![false; matches.len()];
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for i in 0..matches.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;
        let m = &matches[i];

        let Some(closing) = find_closing(&m.name, &matches, &consumed, i) else {
            // Not a tag pair; only a parameter token gets protected.
            if m.is_param {
                ranges.push((m.start, m.end));
            }
            continue;
        };

        if m.name == NO_TRANSLATE_TAG {
            // The whole span is one protected unit; anything the scan found
            // inside it no longer counts as a separate match.
            let end = matches[closing].end;
            for (k, other) in matches.iter().enumerate() {
                if other.start >= m.start && other.end <= end {
                    consumed[k] = true;
                }
            }
            ranges.push((m.start, end));
        } else {
            consumed[closing] = true;
            ranges.push((m.start, m.end));
            ranges.push((matches[closing].start, matches[closing].end));
        }
    }

    ranges.sort_unstable_by_key(|r| r.0);

    let mut working = String::with_capacity(text.len());
    let mut spans = Vec::with_capacity(ranges.len());
    let mut cursor = 0;
    for (start, end) in ranges {
        // A range swallowed by an earlier span (e.g. a pair's closer that sits
        // inside an <i2nt> unit) is already covered; protecting it twice would
        // splice out of order.
        if start < cursor {
            continue;
        }
        working.push_str(&text[cursor..start]);
        working.push(placeholder_char(spans.len()));
        spans.push(text[start..end].to_string());
        cursor = end;
    }
    working.push_str(&text[cursor..]);

    (working, spans)
}

/// Substitute placeholder characters back with their protected spans.
pub fn restore_spans(text: &str, spans: &[String]) -> String {
    let mut result = text.to_string();
    for (index, span) in spans.iter().enumerate() {
        result = result.replace(placeholder_char(index), span);
    }
    result
}
