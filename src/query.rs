//! Translation queries and query batches

use serde::Serialize;

use crate::placeholder;

/// One unit of translatable text submitted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationQuery {
    /// The text as it appeared in the source string; key for lookups.
    pub orig_text: String,
    /// `orig_text` with protected spans replaced by placeholder characters.
    /// This is what actually goes over the wire.
    pub working_text: String,
    /// Source language code ("auto" is accepted by the backend).
    pub lang_from: String,
    /// Target language codes, deduplicated, in insertion order. The order
    /// determines the positional mapping into `results`.
    pub target_langs: Vec<String>,
    /// Protected span literals, indexed by placeholder position.
    pub protected_spans: Vec<String>,
    /// One result per target language, filled once the backend responds.
    pub results: Option<Vec<String>>,
}

impl TranslationQuery {
    pub fn new(text: &str, lang_from: &str, lang_to: &str) -> Self {
        let (working_text, protected_spans) = placeholder::extract_spans(text);
        TranslationQuery {
            orig_text: text.to_string(),
            working_text,
            lang_from: lang_from.to_string(),
            target_langs: vec![lang_to.to_string()],
            protected_spans,
            results: None,
        }
    }

    /// The result for a specific target language, or the first result when
    /// the code is empty. `None` until the backend has responded.
    pub fn result_for(&self, lang_to: &str) -> Option<&str> {
        let results = self.results.as_ref()?;
        if lang_to.is_empty() {
            return results.first().map(String::as_str);
        }
        let index = self.target_langs.iter().position(|l| l == lang_to)?;
        results.get(index).map(String::as_str)
    }
}

/// The set of distinct source strings submitted together in one request.
///
/// Keyed by original text; insertion order is stable and drives the
/// positional mapping between request and response segments. A batch lives
/// for exactly one backend call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationBatch {
    queries: Vec<TranslationQuery>,
}

impl TranslationBatch {
    pub fn new() -> Self {
        TranslationBatch::default()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn queries(&self) -> &[TranslationQuery] {
        &self.queries
    }

    pub(crate) fn queries_mut(&mut self) -> &mut [TranslationQuery] {
        &mut self.queries
    }

    pub fn get(&self, orig_text: &str) -> Option<&TranslationQuery> {
        self.queries.iter().find(|q| q.orig_text == orig_text)
    }

    fn get_mut(&mut self, orig_text: &str) -> Option<&mut TranslationQuery> {
        self.queries.iter_mut().find(|q| q.orig_text == orig_text)
    }

    /// Add one query for `text`, or extend the target set of the existing
    /// query with the same original text. Placeholder extraction runs only
    /// when the entry is created. Empty text is ignored.
    pub fn add_query(&mut self, text: &str, lang_from: &str, lang_to: &str) {
        if text.is_empty() {
            return;
        }
        match self.get_mut(text) {
            Some(query) => {
                if !query.target_langs.iter().any(|l| l == lang_to) {
                    query.target_langs.push(lang_to.to_string());
                }
            }
            None => self.queries.push(TranslationQuery::new(text, lang_from, lang_to)),
        }
    }

    /// The translated result stored for `text` in `lang_to`, if the batch
    /// completed.
    pub fn query_result(&self, text: &str, lang_to: &str) -> Option<&str> {
        self.get(text)?.result_for(lang_to)
    }
}
