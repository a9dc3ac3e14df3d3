//! Wire format of the web service protocol
//!
//! The request body is one string: for each query,
//! `<sourceLang>:<target1>,<target2>,...=<working text>`, queries joined by
//! the batch separator. The reply inverts the nesting: per-query segments
//! joined by the batch separator, per-target-language results joined by the
//! result separator within each segment. Both shapes are fixed by the
//! deployed web service and must match it byte for byte.

use crate::case;
use crate::query::TranslationBatch;

/// Separator between query segments, in both request and reply.
pub const BATCH_SEPARATOR: &str = "<I2Loc>";

/// Separator between per-target-language results within one reply segment.
pub const RESULT_SEPARATOR: &str = "<i2>";

/// Build the request body for a batch.
///
/// Fully title-cased text is sent lower-cased: the backend mistranslates
/// "This Is An Example" but not "this is an example". The reassembler forces
/// the title shape back onto the results.
pub fn build_request_body(batch: &TranslationBatch) -> String {
    let mut body = String::new();
    for query in batch.queries() {
        if !body.is_empty() {
            body.push_str(BATCH_SEPARATOR);
        }
        body.push_str(&query.lang_from);
        body.push(':');
        for (i, lang) in query.target_langs.iter().enumerate() {
            if i != 0 {
                body.push(',');
            }
            body.push_str(lang);
        }
        body.push('=');
        if case::title_case(&query.working_text) == query.working_text {
            body.push_str(&query.working_text.to_lowercase());
        } else {
            body.push_str(&query.working_text);
        }
    }
    body
}
