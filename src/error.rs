/// Error types for the translation query protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The client is not configured correctly (e.g. no web service URL)
    Config(String),
    /// The web service could not be reached, or returned an unusable reply
    BackendUnreachable(String),
    /// The web service answered with its "outdated script" error page and
    /// needs to be reinstalled
    BackendMisconfigured(String),
    /// The web service throttled the request; the whole batch may be resubmitted
    RateLimited,
    /// The reply does not line up with the submitted batch
    ProtocolMismatch(String),
    /// Plural rules could not be resolved for a language
    PluralRules(String),
}

impl TranslateError {
    /// Whether the caller may simply resubmit the same batch.
    ///
    /// Only `RateLimited` qualifies; every other error needs intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, TranslateError::RateLimited)
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TranslateError::BackendUnreachable(msg) => write!(f, "{}", msg),
            TranslateError::BackendMisconfigured(msg) => write!(f, "{}", msg),
            TranslateError::RateLimited => {
                write!(f, "The web service throttled the request, try again")
            }
            TranslateError::ProtocolMismatch(msg) => write!(f, "Protocol mismatch: {}", msg),
            TranslateError::PluralRules(msg) => write!(f, "Plural rules error: {}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
