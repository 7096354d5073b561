//! Reply decoder: pulls the `body` field out of the model's JSON envelope.
//!
//! Models regularly answer with Python-style single quotes, wrap the JSON in a
//! Markdown fence, or add a sentence around it. The decoder repairs the known
//! quoting mistakes, parses what is left, and when that still fails hands the
//! raw reply back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Field names of the envelope the model is asked to return.
const ENVELOPE_KEYS: [&str; 2] = ["request", "body"];

/// Shape the model is asked to mirror: the instruction echoed back plus the
/// generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub request: String,
    pub body: String,
}

impl Envelope {
    /// Literal example embedded in the format directive.
    pub fn example_json() -> String {
        let example = Envelope {
            request: "str".to_string(),
            body: "str".to_string(),
        };
        serde_json::to_string(&example).unwrap_or_default()
    }
}

/// Decode a reply into its body text, falling back to `raw` on any failure.
pub fn decode(raw: &str) -> String {
    match extract_body(raw) {
        Ok(body) => body,
        Err(reason) => {
            warn!(error = %reason, response = %raw, "Failed to decode model response");
            raw.to_string()
        }
    }
}

fn extract_body(raw: &str) -> Result<String, String> {
    let repaired = repair_quotes(payload(raw));
    let value: Value = serde_json::from_str(&repaired).map_err(|e| e.to_string())?;

    match value.get("body") {
        Some(Value::String(body)) => Ok(body.clone()),
        Some(Value::Null) | None => Err("response has no body field".to_string()),
        Some(other) => Ok(other.to_string()),
    }
}

/// The outermost `{...}` span, ignoring fences and surrounding prose.
fn payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Rewrite the quoting mistakes models make into valid JSON.
///
/// - `'request':` / `'body':` keys become double-quoted;
/// - remaining single-quoted tokens outside double-quoted strings become JSON
///   strings. A single quote only closes a token when followed by `,` `}` `]`
///   `:` or the end of input, so apostrophes inside values survive;
/// - raw newlines and tabs inside strings are escaped.
pub fn repair_quotes(raw: &str) -> String {
    let mut text = raw.to_string();
    for key in ENVELOPE_KEYS {
        text = text.replace(&format!("'{}':", key), &format!("\"{}\":", key));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let c = chars[i];
                    i += 1;
                    match c {
                        '\\' => {
                            out.push('\\');
                            if i < chars.len() {
                                out.push(chars[i]);
                                i += 1;
                            }
                        }
                        '"' => {
                            out.push('"');
                            break;
                        }
                        c => push_escaped(&mut out, c),
                    }
                }
            }
            '\'' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let c = chars[i];
                    if c == '\\' && i + 1 < chars.len() {
                        match chars[i + 1] {
                            '\'' => out.push('\''),
                            next => {
                                out.push('\\');
                                out.push(next);
                            }
                        }
                        i += 2;
                        continue;
                    }
                    i += 1;
                    if c == '\'' && closes_token(&chars[i..]) {
                        break;
                    }
                    match c {
                        '"' => out.push_str("\\\""),
                        c => push_escaped(&mut out, c),
                    }
                }
                out.push('"');
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn closes_token(rest: &[char]) -> bool {
    match rest.iter().find(|c| !c.is_whitespace()) {
        None => true,
        Some(c) => matches!(c, ',' | '}' | ']' | ':'),
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c => out.push(c),
    }
}
