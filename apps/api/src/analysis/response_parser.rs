//! Response Parser/Repair — recovers the skill profile JSON from a free-form model reply.
//!
//! Tier 1: the first "```json" marker followed by a complete object. The object is
//! bounded by a brace-depth scan (string literals and escapes respected), so trailing
//! prose, a missing closing fence, or further fenced blocks do not matter.
//! Tier 2: the whole reply, trimmed.
//!
//! Pure: the same input always yields the same result.

use crate::analysis::models::SkillProfile;
use crate::errors::AppError;

const FENCE_MARKER: &str = "```json";

pub fn parse_skill_profile(raw: &str) -> Result<SkillProfile, AppError> {
    let candidate = fenced_object(raw).unwrap_or_else(|| raw.trim());
    serde_json::from_str(candidate).map_err(|e| AppError::MalformedAiResponse {
        reason: e.to_string(),
        raw_response: raw.to_string(),
    })
}

/// Returns the JSON object following the first fence marker that has one.
fn fenced_object(raw: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(pos) = raw[offset..].find(FENCE_MARKER) {
        let body_start = offset + pos + FENCE_MARKER.len();
        let body = raw[body_start..].trim_start();
        if body.starts_with('{') {
            if let Some(len) = balanced_object_len(body) {
                return Some(&body[..len]);
            }
        }
        offset = body_start;
    }
    None
}

/// Byte length of the object at the start of `s` (which begins with `{`),
/// or `None` if the object is never closed.
fn balanced_object_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in s.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
