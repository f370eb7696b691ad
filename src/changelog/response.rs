use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use super::error::{GenerationError, Result};
use super::types::GeneratedChangelog;

pub const MARKDOWN_PLACEHOLDER: &str = "Error generating markdown";
pub const HTML_PLACEHOLDER: &str = "<p>Error generating HTML</p>";
pub const PLAIN_TEXT_PLACEHOLDER: &str = "Error generating plain text";

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*\r?\n?").expect("valid fence pattern"));
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid fence pattern"));

/// Removes a leading ```` ``` ```` (with optional language tag) and a trailing
/// ```` ``` ```` from the trimmed payload. Either marker may appear alone.
pub fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let start = OPENING_FENCE.find(trimmed).map(|m| m.end()).unwrap_or(0);
    let body = &trimmed[start..];
    let end = CLOSING_FENCE.find(body).map(|m| m.start()).unwrap_or(body.len());
    body[..end].trim()
}

/// Turns the model's text payload into a [`GeneratedChangelog`].
///
/// An absent or blank payload and invalid JSON are errors. Once the JSON
/// parses, a missing or empty field is replaced by its placeholder instead.
pub fn parse_changelog(payload: Option<&str>) -> Result<GeneratedChangelog> {
    let payload = match payload {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(GenerationError::EmptyResponse),
    };

    let value: Value = serde_json::from_str(strip_code_fences(payload))?;

    let markdown = field_or(&value, "markdown", MARKDOWN_PLACEHOLDER);
    let html = field_or(&value, "html", HTML_PLACEHOLDER);
    let plain_text = field_or(&value, "plainText", PLAIN_TEXT_PLACEHOLDER);

    Ok(GeneratedChangelog {
        markdown,
        html,
        plain_text,
    })
}

fn field_or(value: &Value, name: &str, placeholder: &str) -> String {
    match value.get(name).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            tracing::warn!("Generated changelog has no usable `{}` field", name);
            placeholder.to_string()
        }
    }
}
