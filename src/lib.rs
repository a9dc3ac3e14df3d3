//! Translation query protocol for the I2 Localization web service
//!
//! Translating localization terms through a machine-translation backend needs
//! more than shipping raw strings: parameter tokens and markup must survive
//! untouched, pluralized terms expand into one query per grammatical-number
//! category of the target language, and the backend's replies have to be
//! folded back into the original string shape. This crate implements that
//! protocol:
//!
//! 1. **Query builder** — splits a source string into a batch of
//!    [`TranslationQuery`] entries, one per plural category the target
//!    language supports.
//! 2. **Placeholder extractor** — protects `{[param]}` tokens, tag pairs and
//!    `<i2nt>...</i2nt>` spans behind reserved placeholder characters.
//! 3. **Wire codec** — the delimited request/reply format the deployed web
//!    service speaks, byte for byte.
//! 4. **Result reassembler** — restores protected spans, re-applies the
//!    original case shape, and recombines plural variants into
//!    `[i2p_<Category>]`-tagged strings.
//!
//! # Example
//!
//! ```ignore
//! use i2loc_translate::{Translator, WebServiceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WebServiceClient::from_env()?;
//!     let translator = Translator::new(client);
//!
//!     let result = translator
//!         .translate("You have {[count]} lives", "en", "fr")
//!         .await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod builder;
pub mod case;
pub mod client;
pub mod error;
pub mod mock;
pub mod placeholder;
pub mod plural;
pub mod query;
pub mod reassembly;
pub mod translator;
pub mod wire;


pub use backend::TranslationBackend;
pub use builder::create_queries;
pub use case::{title_case, uppercase_first};
pub use client::WebServiceClient;
pub use error::{TranslateError, TranslateResult};
pub use mock::{MockBackend, MockMode};
pub use placeholder::{NO_TRANSLATE_TAG, PLACEHOLDER_BASE, extract_spans, restore_spans};
pub use plural::{IcuPluralRules, PLURAL_TAG_PREFIX, PluralCategory, PluralRules};
pub use query::{TranslationBatch, TranslationQuery};
pub use reassembly::{parse_response, rebuild_translation};
pub use translator::Translator;
pub use wire::{BATCH_SEPARATOR, RESULT_SEPARATOR, build_request_body};
