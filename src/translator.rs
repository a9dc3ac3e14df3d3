//! High-level translate operations
//!
//! Ties the pipeline together: build the batch, send it through the backend,
//! parse the reply, rebuild the requested string. One backend call per batch;
//! a batch either completes with results on every query or fails as a whole.

use crate::backend::TranslationBackend;
use crate::builder;
use crate::error::TranslateResult;
use crate::plural::{IcuPluralRules, PluralRules};
use crate::query::TranslationBatch;
use crate::reassembly;
use crate::wire;

/// Translates strings through a [`TranslationBackend`].
pub struct Translator<B: TranslationBackend> {
    backend: B,
    rules: Box<dyn PluralRules + Send + Sync>,
}

impl<B: TranslationBackend> Translator<B> {
    /// Create a translator using ICU plural rules.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            rules: Box::new(IcuPluralRules::new()),
        }
    }

    /// Create a translator with custom plural rules.
    pub fn with_rules(backend: B, rules: Box<dyn PluralRules + Send + Sync>) -> Self {
        Self { backend, rules }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Translate one string from `lang_from` (or "auto") to `lang_to`.
    ///
    /// Two silent short circuits, neither of which contacts the backend:
    /// identical source and target return the input unchanged, and an empty
    /// target code means the language is not supported for translation and
    /// yields an empty string.
    pub async fn translate(
        &self,
        text: &str,
        lang_from: &str,
        lang_to: &str,
    ) -> TranslateResult<String> {
        if lang_to == lang_from {
            return Ok(text.to_string());
        }
        if lang_to.is_empty() {
            return Ok(String::new());
        }

        let mut batch = TranslationBatch::new();
        builder::create_queries(text, lang_from, lang_to, self.rules.as_ref(), &mut batch);
        if batch.is_empty() {
            return Ok(String::new());
        }

        self.run(&mut batch).await?;
        reassembly::rebuild_translation(text, &batch, lang_to, self.rules.as_ref())
    }

    /// Run a prepared batch through the backend, filling in every query's
    /// results. The batch is left untouched on failure.
    pub async fn translate_batch(&self, batch: &mut TranslationBatch) -> TranslateResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.run(batch).await
    }

    async fn run(&self, batch: &mut TranslationBatch) -> TranslateResult<()> {
        let body = wire::build_request_body(batch);
        let reply = self.backend.fetch(&body).await?;
        reassembly::parse_response(&reply, batch)
    }
}
