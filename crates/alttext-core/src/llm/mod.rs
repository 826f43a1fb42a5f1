//! Alt text generation through vision LLM providers.
//!
//! Each provider variant owns its request construction and response
//! parsing; `Generator` dispatches on the variant and normalizes failures
//! into `ProviderError`.

pub(crate) mod anthropic;
pub mod media;
pub(crate) mod openai;
pub mod prompt;
pub(crate) mod provider;

pub use provider::{GenerationRequest, GenerationResult, Generator, Provider};
