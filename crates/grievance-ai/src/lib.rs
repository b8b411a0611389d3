//! AI classification layer: prompt, reply normalization, and the department alias table.

pub mod aliases;
pub mod normalizer;
pub mod prompt;

#[cfg(feature = "http")]
mod client;
#[cfg(feature = "http")]
pub use client::{ClassifierClient, ClassifierConfig, ClassifyError, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub use aliases::{AliasError, AliasTable};
pub use normalizer::{NormalizedClassification, Normalizer, RawAiResponse};
pub use prompt::{build_prompt, extract_candidate_text};
