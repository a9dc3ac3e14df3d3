//! Backend abstraction for the translation web service
//!
//! The protocol only needs one operation from its transport: send the request
//! body, get the reply blob back. Keeping that behind a trait lets the rest
//! of the crate run against the real web service or a deterministic mock.

use async_trait::async_trait;

use crate::error::TranslateResult;

/// A transport that can carry one batch request to the translation backend.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Submit the wire-format request body and return the raw reply blob.
    ///
    /// Implementations report transport failures as
    /// [`TranslateError::BackendUnreachable`](crate::TranslateError::BackendUnreachable);
    /// interpreting the reply is the reassembler's job.
    async fn fetch(&self, request_body: &str) -> TranslateResult<String>;

    /// Identifies the backend in diagnostics.
    fn backend_name(&self) -> &str;
}
