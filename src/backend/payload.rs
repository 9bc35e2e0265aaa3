//! Response payload decoding
//!
//! The upstream service answers with the structured fields directly, nested
//! under `results`, as a JSON document embedded in a string, or as plain
//! text. Decoding runs a fixed sequence of steps, each its own function:
//!
//! 1. [`parse_body`]: bytes to JSON, unparsable bodies become `{}`
//! 2. [`select_results`]: prefer `results` over the whole body
//! 3. [`classify`]: unwrap an embedded `text` document or a bare string
//! 4. [`Payload::into_result`]: pull out the known fields

use super::GuidanceResult;
use serde_json::{Map, Value};

/// Shapes a selected payload can reduce to
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured fields (possibly recovered from a JSON string)
    Fields(Map<String, Value>),
    /// Plain text; becomes the meaning
    FreeText(String),
}

/// Full pipeline from raw body to result
pub fn decode(body: &[u8]) -> GuidanceResult {
    classify(select_results(parse_body(body))).into_result()
}

/// Parse the body; anything that is not JSON is treated as an empty object
pub fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Response body is not JSON, treating as empty");
        Value::Object(Map::new())
    })
}

/// `body.results` when present and non-null, else the body itself
pub fn select_results(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("results") {
            Some(results) if !results.is_null() => results,
            Some(_) | None => Value::Object(map),
        },
        other => other,
    }
}

/// Reduce a selected payload to one of the known shapes.
///
/// Ordered attempts:
/// - an object whose `text` is a non-empty string is replaced by the
///   document inside that string, or by free text if it is not JSON
/// - a bare string is parsed the same way
/// - any other object is taken as fields
/// - anything else carries no fields
pub fn classify(payload: Value) -> Payload {
    match payload {
        Value::Object(map) => match map.get("text") {
            Some(Value::String(text)) if !text.is_empty() => unwrap_embedded(text),
            _ => Payload::Fields(map),
        },
        Value::String(text) => unwrap_embedded(&text),
        _ => Payload::Fields(Map::new()),
    }
}

/// A string that may hold a JSON document. Only text that is not JSON at
/// all is kept as free text; a scalar or array document has no fields.
fn unwrap_embedded(text: &str) -> Payload {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Payload::Fields(map),
        Ok(_) => Payload::Fields(Map::new()),
        Err(_) => Payload::FreeText(text.to_string()),
    }
}

/// Read a field as text. Chapter and verse are often numbers upstream.
fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Payload {
    pub fn into_result(self) -> GuidanceResult {
        match self {
            Payload::FreeText(text) => GuidanceResult::meaning(text),
            Payload::Fields(map) => GuidanceResult {
                sanskrit: field_text(&map, "sanskrit"),
                transliteration: field_text(&map, "transliteration"),
                meaning: field_text(&map, "meaning").or_else(|| field_text(&map, "text")),
                chapter: field_text(&map, "chapter"),
                verse: field_text(&map, "verse"),
            },
        }
    }
}
