//! Query construction
//!
//! A plain string becomes a single query. A pluralized string (one containing
//! `[i2p_` tags) is decomposed into one query per plural category the target
//! language supports: the plural template is isolated, its `{[...]}` numeric
//! parameter is replaced by the category's representative test number, and the
//! resulting variant is queried like any other text.

use std::sync::OnceLock;

use regex::Regex;

use crate::plural::{PLURAL_TAG_PREFIX, PluralCategory, PluralRules};
use crate::query::TranslationBatch;

/// Pattern of the numeric parameter token inside a plural template.
pub(crate) fn param_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\[(.*?)\]\}").expect("parameter pattern compiles"))
}

/// Isolate the plural template of a pluralized string.
///
/// The template is the text up to the first plural tag. When the string
/// starts with a plural tag, the template is instead the text after that
/// tag's closing bracket, up to the next plural tag or the end of the string.
pub(crate) fn plural_template(text: &str) -> &str {
    match text.find(PLURAL_TAG_PREFIX) {
        None => text,
        Some(0) => {
            let start = text.find(']').map_or(text.len(), |i| i + 1);
            let end = text[start..]
                .find(PLURAL_TAG_PREFIX)
                .map_or(text.len(), |i| start + i);
            &text[start..end]
        }
        Some(first_tag) => &text[..first_tag],
    }
}

/// Replace every numeric parameter token in the template with `number`.
pub(crate) fn substitute_param(template: &str, number: u32) -> String {
    param_pattern()
        .replace_all(template, number.to_string().as_str())
        .into_owned()
}

/// Add the queries needed to translate `text` from `lang_from` to `lang_to`.
///
/// Non-plural text yields exactly one query. Pluralized text yields one query
/// per plural category `lang_to` supports; categories the language does not
/// distinguish are skipped.
pub fn create_queries(
    text: &str,
    lang_from: &str,
    lang_to: &str,
    rules: &dyn PluralRules,
    batch: &mut TranslationBatch,
) {
    if !text.contains(PLURAL_TAG_PREFIX) {
        batch.add_query(text, lang_from, lang_to);
        return;
    }

    let template = plural_template(text);
    for category in PluralCategory::ALL {
        let Some(number) = rules.test_number(lang_to, category) else {
            continue;
        };
        let variant = substitute_param(template, number);
        batch.add_query(&variant, lang_from, lang_to);
    }
}
