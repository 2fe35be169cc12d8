use crate::error::TrawlError;
use crate::model::{CapabilityProfile, Confidence};
use serde_json::Value;
use std::path::Path;

impl CapabilityProfile {
    /// Profile used when the extractor's reply cannot be decoded.
    pub fn fallback(user_input: &str) -> Self {
        Self {
            summary: user_input.trim().to_string(),
            keywords: Vec::new(),
            url: String::new(),
            confidence: Confidence::Low,
        }
    }

    /// Decode the raw JSON reply of the external profile extractor.
    ///
    /// Tolerates a surrounding markdown code fence and prose around the JSON
    /// object. Missing or malformed fields fall back to `user_input` for the
    /// summary, no keywords, an empty url and medium confidence. A reply that
    /// holds no JSON object at all yields [`CapabilityProfile::fallback`].
    pub fn from_model_output(text: &str, user_input: &str) -> Self {
        let Some(Value::Object(fields)) = extract_json_object(text) else {
            tracing::warn!("profile extractor returned no JSON object, using fallback");
            return Self::fallback(user_input);
        };
        if fields.is_empty() {
            return Self::fallback(user_input);
        }

        let summary = fields
            .get("summary")
            .and_then(value_as_string)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| user_input.trim().to_string());

        let keywords = match fields.get("keywords") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(value_as_string)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            _ => Vec::new(),
        };

        let url = fields
            .get("url")
            .and_then(value_as_string)
            .map(|u| u.trim().to_string())
            .unwrap_or_default();

        let confidence = fields
            .get("confidence")
            .and_then(value_as_string)
            .and_then(|c| Confidence::from_str_loose(&c))
            .unwrap_or_default();

        Self {
            summary,
            keywords,
            url,
            confidence,
        }
    }

    /// Read a profile saved as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, TrawlError> {
        let content = std::fs::read_to_string(path)?;
        let profile = serde_json::from_str(&content)?;
        Ok(profile)
    }
}

/// Pull the outermost `{ ... }` span out of a model reply and parse it.
fn extract_json_object(text: &str) -> Option<Value> {
    let mut cleaned = text.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(rest) = cleaned.strip_prefix("```") {
        // drop the info string ("json") up to the first newline
        cleaned = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        cleaned = cleaned.trim_end_matches(|c: char| c == '`' || c.is_whitespace());
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end]).ok()
}

/// Render scalars as strings; arrays and objects are rejected.
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_reply() {
        let reply = r#"{
            "summary": "Managed cloud and cyber security for government.",
            "keywords": [" cloud ", "cyber security", "", "penetration testing"],
            "url": " https://example.com.au ",
            "confidence": "HIGH"
        }"#;
        let profile = CapabilityProfile::from_model_output(reply, "example.com.au");
        assert_eq!(profile.summary, "Managed cloud and cyber security for government.");
        assert_eq!(
            profile.keywords,
            vec!["cloud", "cyber security", "penetration testing"]
        );
        assert_eq!(profile.url, "https://example.com.au");
        assert_eq!(profile.confidence, Confidence::High);
    }

    #[test]
    fn test_fenced_reply_with_prose() {
        let reply = "```json\nSure! {\"summary\": \"Cleaning\", \"keywords\": [\"cleaning\"]}\n```";
        let profile = CapabilityProfile::from_model_output(reply, "we clean offices");
        assert_eq!(profile.summary, "Cleaning");
        assert_eq!(profile.keywords, vec!["cleaning"]);
        assert_eq!(profile.url, "");
        assert_eq!(profile.confidence, Confidence::Medium);
    }

    #[test]
    fn test_garbage_reply_falls_back() {
        let profile =
            CapabilityProfile::from_model_output("I could not help", "  we build bridges ");
        assert_eq!(profile, CapabilityProfile::fallback("we build bridges"));
        assert_eq!(profile.confidence, Confidence::Low);
        assert!(profile.keywords.is_empty());
    }

    #[test]
    fn test_non_list_keywords_ignored() {
        let reply = r#"{"summary": "", "keywords": "cloud, cyber", "confidence": "unsure"}"#;
        let profile = CapabilityProfile::from_model_output(reply, "cloud things");
        assert_eq!(profile.summary, "cloud things");
        assert!(profile.keywords.is_empty());
        assert_eq!(profile.confidence, Confidence::Medium);
    }

    #[test]
    fn test_profile_json_round_trip_defaults() {
        let profile: CapabilityProfile =
            serde_json::from_str(r#"{"summary": "x", "keywords": ["a"]}"#).unwrap();
        assert_eq!(profile.url, "");
        assert_eq!(profile.confidence, Confidence::Medium);
    }
}
