//! View objects derived from the prompt form plus the wire types spoken by
//! the backend. Both `PromptPreview` and `SavePayload` are computed fresh
//! from the current field values every time they are needed; nothing in this
//! module holds state between events.

use serde::{Deserialize, Serialize};

/// Value substituted for the weirdness / style influence sliders when the
/// field is empty or does not parse as an integer.
pub const DEFAULT_LEVEL: i64 = 50;

/// Normalized prompt object rendered as indented JSON in the preview pane.
/// Field order matters: serialization follows declaration order and the
/// preview is meant to read the same way the backend's `formatted_prompt`
/// does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPreview {
    pub title: String,
    /// Falls back to the subject field when the lyrics field is empty.
    pub lyrics: String,
    pub styles: Vec<String>,
    pub excluded_styles: Vec<String>,
    pub weirdness: i64,
    pub style_influence: i64,
    pub instrumental: bool,
}

/// Raw-field object POSTed to the save endpoint. Unlike the preview, styles
/// stay as unsplit comma-separated text and the subject travels as its own
/// field; the backend does its own splitting. This shape is an external
/// contract and must not drift toward `PromptPreview`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavePayload {
    pub title: String,
    pub lyrics: String,
    pub subject: String,
    pub styles: String,
    pub excluded_styles: String,
    pub weirdness: LevelValue,
    pub style_influence: LevelValue,
    pub is_instrumental: bool,
}

/// Slider value as the backend expects it: the raw field text when the user
/// typed something, the integer default when the field is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LevelValue {
    Raw(String),
    Default(i64),
}

impl LevelValue {
    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            LevelValue::Default(DEFAULT_LEVEL)
        } else {
            LevelValue::Raw(raw.to_string())
        }
    }
}

/// Body returned by `POST .../save/`. The backend replies with HTTP 400 on
/// failure but the body is still this shape, so the client parses it either
/// way.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub formatted_prompt: Option<PromptPreview>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body returned by `GET .../prompts/`.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptListResponse {
    pub prompts: Vec<PromptPreview>,
}

/// Split comma-separated style text into trimmed, non-empty tokens, keeping
/// the order the user typed them in.
pub fn split_styles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a slider field, substituting the default for anything that is not a
/// plain integer.
pub fn parse_level(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(DEFAULT_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_styles_trims_and_drops_empty_tokens() {
        assert_eq!(split_styles("a, b,,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_styles_of_empty_text_is_empty() {
        assert_eq!(split_styles(""), Vec::<String>::new());
        assert_eq!(split_styles(" , , "), Vec::<String>::new());
    }

    #[test]
    fn split_styles_preserves_order() {
        assert_eq!(
            split_styles("disco, rap, cinematic"),
            vec!["disco", "rap", "cinematic"]
        );
    }

    #[test]
    fn parse_level_defaults_when_absent_or_unparsable() {
        assert_eq!(parse_level(""), 50);
        assert_eq!(parse_level("loud"), 50);
        assert_eq!(parse_level(" 42 "), 42);
        assert_eq!(parse_level("0"), 0);
    }

    #[test]
    fn level_value_serializes_raw_text_or_integer_default() {
        assert_eq!(
            serde_json::to_value(LevelValue::from_field("64")).unwrap(),
            json!("64")
        );
        assert_eq!(
            serde_json::to_value(LevelValue::from_field("")).unwrap(),
            json!(50)
        );
    }

    #[test]
    fn save_payload_keeps_styles_raw_and_subject_separate() {
        let payload = SavePayload {
            title: "Song".to_string(),
            lyrics: String::new(),
            subject: "a quiet morning".to_string(),
            styles: "disco, rap,,".to_string(),
            excluded_styles: String::new(),
            weirdness: LevelValue::from_field("80"),
            style_influence: LevelValue::from_field(""),
            is_instrumental: true,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["styles"], json!("disco, rap,,"));
        assert_eq!(value["subject"], json!("a quiet morning"));
        assert_eq!(value["weirdness"], json!("80"));
        assert_eq!(value["style_influence"], json!(50));
        assert_eq!(value["is_instrumental"], json!(true));
    }

    #[test]
    fn save_response_parses_failure_body() {
        let response: SaveResponse =
            serde_json::from_str(r#"{"success": false, "error": "title too long"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("title too long"));
        assert!(response.id.is_none());
    }
}
