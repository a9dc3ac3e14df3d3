//! Mock backend for testing
//!
//! Parses the wire-format request body and fabricates a well-formed reply
//! blob (or a canned failure), so the whole pipeline can be exercised without
//! a deployed web service.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::backend::TranslationBackend;
use crate::error::{TranslateError, TranslateResult};
use crate::wire::{BATCH_SEPARATOR, RESULT_SEPARATOR};

/// Mock behaviors for different test scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return every text unchanged.
    Echo,
    /// Append the target language: "hello" → "hello_fr".
    Suffix,
    /// Predefined (text, target language) → translation mappings, falling
    /// back to `Suffix` behavior for unknown pairs. Keys are matched against
    /// the wire text, i.e. after placeholder extraction and title-case
    /// lowering.
    Mappings(HashMap<(String, String), String>),
    /// Fail at the transport level.
    Error(String),
    /// Return a fixed raw reply body, e.g. an HTML error page.
    Page(String),
}

/// Deterministic stand-in for the translation web service.
#[derive(Debug, Clone)]
pub struct MockBackend {
    mode: MockMode,
}

impl MockBackend {
    pub fn new(mode: MockMode) -> Self {
        Self { mode }
    }

    fn translate_one(&self, text: &str, lang_to: &str) -> String {
        match &self.mode {
            MockMode::Suffix => format!("{}_{}", text, lang_to),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), lang_to.to_string());
                map.get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, lang_to))
            }
            _ => text.to_string(),
        }
    }

    fn respond(&self, request_body: &str) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Error(msg) => Err(TranslateError::BackendUnreachable(msg.clone())),
            MockMode::Page(body) => Ok(body.clone()),
            _ => {
                let mut segments = Vec::new();
                for entry in request_body.split(BATCH_SEPARATOR) {
                    let (header, text) = entry.split_once('=').ok_or_else(|| {
                        TranslateError::ProtocolMismatch(format!(
                            "malformed request entry: {}",
                            entry
                        ))
                    })?;
                    let (_, targets) = header.split_once(':').ok_or_else(|| {
                        TranslateError::ProtocolMismatch(format!(
                            "malformed request header: {}",
                            header
                        ))
                    })?;
                    let results: Vec<String> = targets
                        .split(',')
                        .map(|lang| self.translate_one(text, lang))
                        .collect();
                    segments.push(results.join(RESULT_SEPARATOR));
                }
                Ok(segments.join(BATCH_SEPARATOR))
            }
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn fetch(&self, request_body: &str) -> TranslateResult<String> {
        self.respond(request_body)
    }

    fn backend_name(&self) -> &str {
        "Mock web service"
    }
}
