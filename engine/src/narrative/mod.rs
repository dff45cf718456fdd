//! Untrusted AI-text JSON extraction.
//!
//! The external text-generation collaborator drafts narrative content
//! (crisis flavor text, event descriptions). Its output is free text the
//! engine treats as untrusted: when structured data is needed, callers
//! locate the first `{` / last `}` substring and parse it. Parse failure
//! (syntactically broken JSON) is reported distinctly from validation
//! failure (well-formed JSON of the wrong shape), and neither is ever
//! coerced into default numeric values — the engine's numeric invariants
//! never depend on this text.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from interpreting collaborator text
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The text contains no `{...}` region at all
    #[error("no JSON object found in collaborator text")]
    NoJsonObject,

    /// The `{...}` region is not syntactically valid JSON
    #[error("malformed JSON in collaborator text: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Valid JSON that does not match the expected shape
    #[error("collaborator payload failed validation: {0}")]
    Invalid(#[source] serde_json::Error),
}

/// Extract and parse the first-`{`-to-last-`}` region of `text`.
pub fn extract_json(text: &str) -> Result<serde_json::Value, NarrativeError> {
    let start = text.find('{').ok_or(NarrativeError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(NarrativeError::NoJsonObject)?;
    if end < start {
        return Err(NarrativeError::NoJsonObject);
    }

    serde_json::from_str(&text[start..=end]).map_err(NarrativeError::Malformed)
}

/// Extract the JSON region and deserialize it into `T`.
///
/// Distinguishes the two failure modes: [`NarrativeError::Malformed`] for
/// broken JSON, [`NarrativeError::Invalid`] for JSON that parses but does
/// not fit `T`.
pub fn parse_payload<T: DeserializeOwned>(text: &str) -> Result<T, NarrativeError> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(NarrativeError::Invalid)
}
