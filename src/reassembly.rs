//! Result reassembly
//!
//! Turns the backend's delimited reply blob back into per-query results:
//! segments map positionally onto the batch's queries, each sub-result gets
//! its case shape restored and its protected spans substituted back, and
//! pluralized strings are recombined from their per-category variants.

use crate::builder::{param_pattern, plural_template, substitute_param};
use crate::case;
use crate::error::{TranslateError, TranslateResult};
use crate::placeholder;
use crate::plural::{PLURAL_TAG_PREFIX, PluralCategory, PluralRules};
use crate::query::TranslationBatch;
use crate::wire::{BATCH_SEPARATOR, RESULT_SEPARATOR};

const HTML_MARKERS: [&str; 2] = ["<!DOCTYPE html>", "<HTML>"];
const MISCONFIGURED_MARKER: &str = "The script completed but did not return anything";
const RATE_LIMIT_MARKER: &str = "Service invoked too many times in a short time";

/// Classify an HTML error page the backend may return instead of results.
fn classify_error_page(body: &str) -> TranslateError {
    if body.contains(MISCONFIGURED_MARKER) {
        TranslateError::BackendMisconfigured(
            "The current web service is not supported.\n\
             Please, delete the web service from the Google Drive and install the latest version."
                .to_string(),
        )
    } else if body.contains(RATE_LIMIT_MARKER) {
        TranslateError::RateLimited
    } else {
        TranslateError::BackendUnreachable(format!(
            "There was a problem contacting the web service. Please try again later\n{}",
            body
        ))
    }
}

/// Parse the backend reply and fill in every query's results.
///
/// The batch either completes as a whole or not at all: on any error no
/// partial results are written. Case shaping happens on the raw sub-results,
/// before protected spans go back, so restored spans stay byte-exact.
pub fn parse_response(body: &str, batch: &mut TranslationBatch) -> TranslateResult<()> {
    if HTML_MARKERS.iter().any(|marker| body.starts_with(marker)) {
        return Err(classify_error_page(body));
    }

    let segments: Vec<&str> = body.split(BATCH_SEPARATOR).collect();
    if segments.len() != batch.len() {
        return Err(TranslateError::ProtocolMismatch(format!(
            "expected {} segments, received {}",
            batch.len(),
            segments.len()
        )));
    }

    let mut parsed: Vec<Vec<String>> = Vec::with_capacity(segments.len());
    for (segment, query) in segments.iter().zip(batch.queries()) {
        let mut results: Vec<String> =
            segment.split(RESULT_SEPARATOR).map(str::to_string).collect();
        if results.len() != query.target_langs.len() {
            return Err(TranslateError::ProtocolMismatch(format!(
                "expected {} results for \"{}\", received {}",
                query.target_langs.len(),
                query.orig_text,
                results.len()
            )));
        }

        if case::is_upper(&query.orig_text) {
            for result in &mut results {
                *result = result.to_uppercase();
            }
        } else if case::is_title(&query.orig_text) {
            for result in &mut results {
                *result = case::title_case(result);
            }
        }

        for result in &mut results {
            *result = placeholder::restore_spans(result, &query.protected_spans);
        }
        parsed.push(results);
    }

    for (query, results) in batch.queries_mut().iter_mut().zip(parsed) {
        query.results = Some(results);
    }
    Ok(())
}

fn lookup(batch: &TranslationBatch, text: &str, lang_to: &str) -> TranslateResult<String> {
    batch
        .query_result(text, lang_to)
        .map(str::to_string)
        .ok_or_else(|| {
            TranslateError::ProtocolMismatch(format!("no result for \"{}\" in {}", text, lang_to))
        })
}

/// Put the numeric parameter token back where the test number was substituted.
fn restore_param(translation: &str, number: u32, param: &str) -> String {
    if param.is_empty() {
        translation.to_string()
    } else {
        translation.replace(&number.to_string(), param)
    }
}

/// Recombine the results of a completed batch into the shape of the original
/// source string.
///
/// Non-plural text maps to a single result. For pluralized text the default
/// `Plural` form comes first, untagged; every other supported category is
/// appended as `[i2p_<Category>]form`, but only when its form differs from
/// the default — storing a duplicate of the fallback buys nothing.
pub fn rebuild_translation(
    text: &str,
    batch: &TranslationBatch,
    lang_to: &str,
    rules: &dyn PluralRules,
) -> TranslateResult<String> {
    if !text.contains(PLURAL_TAG_PREFIX) {
        return lookup(batch, text, lang_to);
    }

    let template = plural_template(text);
    let param = param_pattern()
        .find(template)
        .map_or(String::new(), |m| m.as_str().to_string());

    let default_number = rules
        .test_number(lang_to, PluralCategory::Plural)
        .ok_or_else(|| {
            TranslateError::PluralRules(format!("no default plural form for \"{}\"", lang_to))
        })?;
    let default_key = substitute_param(template, default_number);
    let default_form = restore_param(&lookup(batch, &default_key, lang_to)?, default_number, &param);

    let mut rebuilt = String::new();
    rebuilt.push_str(&default_form);

    for category in PluralCategory::SECONDARY {
        let Some(number) = rules.test_number(lang_to, category) else {
            continue;
        };
        let key = substitute_param(template, number);
        let form = restore_param(&lookup(batch, &key, lang_to)?, number, &param);

        if !form.is_empty() && form != default_form {
            rebuilt.push_str(&category.tag());
            rebuilt.push_str(&form);
        }
    }

    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plural::IcuPluralRules;

    fn batch_of(entries: &[(&str, &str)]) -> TranslationBatch {
        let mut batch = TranslationBatch::new();
        for (text, lang_to) in entries {
            batch.add_query(text, "en", lang_to);
        }
        batch
    }

    // ========== parse_response ==========

    #[test]
    fn test_parse_single_result() {
        let mut batch = batch_of(&[("hello", "fr")]);
        parse_response("bonjour", &mut batch).expect("parse succeeds");
        assert_eq!(batch.query_result("hello", "fr"), Some("bonjour"));
    }

    #[test]
    fn test_parse_multiple_segments_positional() {
        let mut batch = batch_of(&[("hello", "fr"), ("bye", "fr")]);
        parse_response("bonjour<I2Loc>au revoir", &mut batch).expect("parse succeeds");
        assert_eq!(batch.query_result("hello", "fr"), Some("bonjour"));
        assert_eq!(batch.query_result("bye", "fr"), Some("au revoir"));
    }

    #[test]
    fn test_parse_multiple_targets_per_segment() {
        let mut batch = batch_of(&[("hello", "fr"), ("hello", "de")]);
        parse_response("bonjour<i2>hallo", &mut batch).expect("parse succeeds");
        assert_eq!(batch.query_result("hello", "fr"), Some("bonjour"));
        assert_eq!(batch.query_result("hello", "de"), Some("hallo"));
    }

    #[test]
    fn test_segment_count_mismatch_is_protocol_error() {
        let mut batch = batch_of(&[("hello", "fr"), ("bye", "fr")]);
        let err = parse_response("bonjour", &mut batch).expect_err("must fail");
        assert!(matches!(err, TranslateError::ProtocolMismatch(_)));
        // No partial results were written
        assert!(batch.queries().iter().all(|q| q.results.is_none()));
    }

    #[test]
    fn test_result_count_mismatch_is_protocol_error() {
        let mut batch = batch_of(&[("hello", "fr"), ("hello", "de")]);
        let err = parse_response("bonjour", &mut batch).expect_err("must fail");
        assert!(matches!(err, TranslateError::ProtocolMismatch(_)));
        assert!(batch.queries().iter().all(|q| q.results.is_none()));
    }

    #[test]
    fn test_no_partial_results_on_late_mismatch() {
        // First segment is fine, second is malformed; nothing is committed
        let mut batch = batch_of(&[("hello", "fr"), ("bye", "fr"), ("bye", "de")]);
        let err = parse_response("bonjour<I2Loc>au revoir", &mut batch).expect_err("must fail");
        assert!(matches!(err, TranslateError::ProtocolMismatch(_)));
        assert!(batch.queries().iter().all(|q| q.results.is_none()));
    }

    #[test]
    fn test_misconfigured_service_page() {
        let mut batch = batch_of(&[("hello", "fr")]);
        let page =
            "<!DOCTYPE html><html>The script completed but did not return anything</html>";
        let err = parse_response(page, &mut batch).expect_err("must fail");
        assert!(matches!(err, TranslateError::BackendMisconfigured(_)));
    }

    #[test]
    fn test_rate_limit_page_is_transient() {
        let mut batch = batch_of(&[("hello", "fr")]);
        let page = "<HTML>Service invoked too many times in a short time</HTML>";
        let err = parse_response(page, &mut batch).expect_err("must fail");
        assert_eq!(err, TranslateError::RateLimited);
        assert!(err.is_transient());
    }

    #[test]
    fn test_unknown_error_page() {
        let mut batch = batch_of(&[("hello", "fr")]);
        let err = parse_response("<HTML>something broke</HTML>", &mut batch).expect_err("must fail");
        match err {
            TranslateError::BackendUnreachable(msg) => assert!(msg.contains("something broke")),
            other => panic!("expected BackendUnreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_upper_case_shape_forced() {
        let mut batch = batch_of(&[("HELLO", "fr")]);
        parse_response("bonjour", &mut batch).expect("parse succeeds");
        assert_eq!(batch.query_result("HELLO", "fr"), Some("BONJOUR"));
    }

    #[test]
    fn test_title_case_shape_forced() {
        let mut batch = batch_of(&[("Hello World", "fr")]);
        parse_response("le monde bonjour", &mut batch).expect("parse succeeds");
        assert_eq!(
            batch.query_result("Hello World", "fr"),
            Some("Le Monde Bonjour")
        );
    }

    #[test]
    fn test_mixed_case_left_alone() {
        let mut batch = batch_of(&[("hello World", "fr")]);
        parse_response("bonjour monde", &mut batch).expect("parse succeeds");
        assert_eq!(batch.query_result("hello World", "fr"), Some("bonjour monde"));
    }

    #[test]
    fn test_spans_restored_byte_exact_despite_case_forcing() {
        let mut batch = batch_of(&[("HELLO {[123]}", "fr")]);
        let query = batch.get("HELLO {[123]}").expect("query exists");
        let reply = format!(
            "bonjour {}",
            query.working_text.chars().last().expect("placeholder")
        );
        parse_response(&reply, &mut batch).expect("parse succeeds");
        assert_eq!(
            batch.query_result("HELLO {[123]}", "fr"),
            Some("BONJOUR {[123]}")
        );
    }

    #[test]
    fn test_span_with_lowercase_disables_case_forcing() {
        // The shape check runs on the original text, so a lower-case span
        // means the text no longer counts as all upper-case
        let mut batch = batch_of(&[("HELLO <i2nt>keep me</i2nt>", "fr")]);
        let query = batch.get("HELLO <i2nt>keep me</i2nt>").expect("query exists");
        let reply = format!(
            "bonjour {}",
            query.working_text.chars().last().expect("placeholder")
        );
        parse_response(&reply, &mut batch).expect("parse succeeds");
        assert_eq!(
            batch.query_result("HELLO <i2nt>keep me</i2nt>", "fr"),
            Some("bonjour <i2nt>keep me</i2nt>")
        );
    }

    // ========== rebuild_translation ==========

    #[test]
    fn test_rebuild_plain_text() {
        let mut batch = batch_of(&[("hello", "fr")]);
        parse_response("bonjour", &mut batch).expect("parse succeeds");
        let rules = IcuPluralRules::new();
        assert_eq!(
            rebuild_translation("hello", &batch, "fr", &rules).expect("rebuild"),
            "bonjour"
        );
    }

    #[test]
    fn test_rebuild_plural_with_differing_forms() {
        // French: One (1) and the default form (6)
        let rules = IcuPluralRules::new();
        let mut batch = TranslationBatch::new();
        crate::builder::create_queries(
            "{[n]} items[i2p_One]{[n]} item",
            "en",
            "fr",
            &rules,
            &mut batch,
        );
        parse_response("1 article<I2Loc>6 articles", &mut batch).expect("parse succeeds");

        let rebuilt =
            rebuild_translation("{[n]} items[i2p_One]{[n]} item", &batch, "fr", &rules)
                .expect("rebuild");
        assert_eq!(rebuilt, "{[n]} articles[i2p_One]{[n]} article");
    }

    #[test]
    fn test_rebuild_plural_identical_forms_collapse() {
        // Both categories came back the same; only the default is stored
        let rules = IcuPluralRules::new();
        let mut batch = TranslationBatch::new();
        crate::builder::create_queries(
            "{[n]} items[i2p_One]{[n]} item",
            "en",
            "fr",
            &rules,
            &mut batch,
        );
        parse_response("1 sheep<I2Loc>6 sheep", &mut batch).expect("parse succeeds");

        let rebuilt =
            rebuild_translation("{[n]} items[i2p_One]{[n]} item", &batch, "fr", &rules)
                .expect("rebuild");
        assert_eq!(rebuilt, "{[n]} sheep");
    }

    #[test]
    fn test_rebuild_missing_result_is_protocol_error() {
        let rules = IcuPluralRules::new();
        let batch = batch_of(&[("hello", "fr")]);
        let err = rebuild_translation("hello", &batch, "fr", &rules).expect_err("must fail");
        assert!(matches!(err, TranslateError::ProtocolMismatch(_)));
    }
}
