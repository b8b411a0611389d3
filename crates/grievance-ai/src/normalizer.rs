//! Normalization of AI classification replies.
//!
//! Classification is advisory: whatever the model returns (or fails to
//! return), submission proceeds with a valid priority, department, and
//! summary. Nothing in this module returns an error.

use grievance_core::{Department, Priority};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::aliases::AliasTable;

/// Summary used when the reply parsed but carried no usable summary.
pub const SUMMARY_PLACEHOLDER: &str = "No summary available yet.";

/// Summary used when the reply could not be used at all.
pub const FAILED_SUMMARY: &str = "AI analysis failed.";

/// A classification reply exactly as the model sent it. Any field may be
/// missing or hold any JSON type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAiResponse {
    #[serde(default)]
    pub ai_priority: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub summary: Option<Value>,
}

/// The canonical triple persisted with each grievance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedClassification {
    pub ai_priority: Priority,
    pub category: Department,
    pub summary: String,
}

impl NormalizedClassification {
    /// Defaults for a reply that could not be used.
    pub fn fallback() -> Self {
        Self {
            ai_priority: Priority::Low,
            category: Department::Other,
            summary: FAILED_SUMMARY.to_string(),
        }
    }
}

/// Normalizes replies against an [`AliasTable`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
}

impl Normalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Normalize an already-decoded reply. `None` yields the fallback.
    pub fn normalize(&self, raw: Option<&RawAiResponse>) -> NormalizedClassification {
        let Some(raw) = raw else {
            warn!("no classification reply, using defaults");
            return NormalizedClassification::fallback();
        };

        let ai_priority = raw
            .ai_priority
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(Priority::Low);

        let category = raw
            .category
            .as_ref()
            .and_then(Value::as_str)
            .map_or(Department::Other, |s| self.aliases.resolve(s));

        let summary = raw
            .summary
            .as_ref()
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map_or_else(|| SUMMARY_PLACEHOLDER.to_string(), str::to_string);

        debug!(priority = %ai_priority, category = %category, "classification normalized");
        NormalizedClassification {
            ai_priority,
            category,
            summary,
        }
    }

    /// Normalize the model's raw text reply.
    ///
    /// Code fences are stripped before parsing; if the remainder is not a
    /// JSON object, the outermost `{...}` span is tried instead. Any parse
    /// failure yields the fallback for all three fields.
    pub fn normalize_text(&self, raw: Option<&str>) -> NormalizedClassification {
        let Some(text) = raw else {
            warn!("no classification reply, using defaults");
            return NormalizedClassification::fallback();
        };

        match parse_reply(text) {
            Some(reply) => self.normalize(Some(&reply)),
            None => {
                let preview: String = text.chars().take(200).collect();
                warn!(reply = %preview, "unparseable classification reply, using defaults");
                NormalizedClassification::fallback()
            }
        }
    }
}

fn parse_reply(text: &str) -> Option<RawAiResponse> {
    let cleaned = strip_fences(text);
    if let Some(reply) = parse_object(&cleaned) {
        return Some(reply);
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&cleaned[start..=end])
}

/// Only a JSON object is a reply; arrays and scalars are rejected.
fn parse_object(json: &str) -> Option<RawAiResponse> {
    match serde_json::from_str::<Value>(json).ok()? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Remove the first ```` ```json ```` marker (any case) and every remaining
/// ```` ``` ````, then trim.
fn strip_fences(text: &str) -> String {
    const TAGGED: &str = "```json";
    let mut out = text.to_string();
    if let Some(pos) = out.to_ascii_lowercase().find(TAGGED) {
        out.replace_range(pos..pos + TAGGED.len(), "");
    }
    out.replace("```", "").trim().to_string()
}
