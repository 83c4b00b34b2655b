//! Upstream response shape normalization.
//!
//! The payload location in a Vertex AI generation response varies by
//! model family and version. Rather than nested conditional probing,
//! each known location is a [`PayloadSlot`] variant and every media kind
//! declares an ordered priority list; the first slot that yields a value
//! wins.

use super::providers::ProviderError;
use serde_json::Value;

/// A known location for base64 media in an upstream response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSlot {
    /// `predictions[0]` is the base64 string itself.
    PredictionString,
    /// `predictions[0].bytesBase64Encoded`
    PredictionBytes,
    /// `predictions[0].video.bytesBase64Encoded`
    PredictionVideoBytes,
    /// First `candidates[0].content.parts[*]` carrying `inlineData.data`.
    InlineDataPart,
}

impl PayloadSlot {
    pub fn probe<'a>(&self, body: &'a Value) -> Option<&'a str> {
        match self {
            PayloadSlot::PredictionString => first_prediction(body)?.as_str(),
            PayloadSlot::PredictionBytes => {
                first_prediction(body)?.get("bytesBase64Encoded")?.as_str()
            }
            PayloadSlot::PredictionVideoBytes => first_prediction(body)?
                .get("video")?
                .get("bytesBase64Encoded")?
                .as_str(),
            PayloadSlot::InlineDataPart => candidate_parts(body)?
                .iter()
                .find_map(|part| part.get("inlineData")?.get("data")?.as_str()),
        }
    }
}

/// Probe order for video generation responses.
pub const VIDEO_SLOTS: &[PayloadSlot] = &[
    PayloadSlot::PredictionString,
    PayloadSlot::PredictionBytes,
    PayloadSlot::PredictionVideoBytes,
];

/// Probe order for image generation responses.
pub const IMAGE_SLOTS: &[PayloadSlot] = &[
    PayloadSlot::PredictionString,
    PayloadSlot::PredictionBytes,
    PayloadSlot::PredictionVideoBytes,
    PayloadSlot::InlineDataPart,
];

/// Locate the base64 media payload in a successful response body.
pub fn extract_base64<'a>(
    body: &'a Value,
    slots: &[PayloadSlot],
) -> Result<&'a str, ProviderError> {
    slots
        .iter()
        .find_map(|slot| slot.probe(body))
        .ok_or(ProviderError::NoMedia)
}

pub fn data_uri(mime_type: &str, encoded: &str) -> String {
    format!("data:{};base64,{}", mime_type, encoded)
}

/// First text part of the first candidate, if any.
pub fn first_text_part(body: &Value) -> Option<&str> {
    candidate_parts(body)?.first()?.get("text")?.as_str()
}

/// Parse a face count out of model text output: strip markdown
/// asterisks, trim, parse as integer. Anything unparseable counts as 1.
pub fn parse_count(text: &str) -> i64 {
    text.replace('*', "").trim().parse().unwrap_or(1)
}

fn first_prediction(body: &Value) -> Option<&Value> {
    body.get("predictions")?.get(0)
}

fn candidate_parts(body: &Value) -> Option<&Vec<Value>> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_prediction_wins() {
        let body = json!({ "predictions": ["AAAA"] });
        let encoded = extract_base64(&body, VIDEO_SLOTS).unwrap();
        assert_eq!(data_uri("video/mp4", encoded), "data:video/mp4;base64,AAAA");
    }

    #[test]
    fn prediction_bytes_field_is_found() {
        let body = json!({ "predictions": [{ "bytesBase64Encoded": "BBBB" }] });
        let encoded = extract_base64(&body, VIDEO_SLOTS).unwrap();
        assert_eq!(data_uri("video/mp4", encoded), "data:video/mp4;base64,BBBB");
    }

    #[test]
    fn nested_video_bytes_are_found() {
        let body = json!({ "predictions": [{ "video": { "bytesBase64Encoded": "CCCC" } }] });
        assert_eq!(extract_base64(&body, VIDEO_SLOTS).unwrap(), "CCCC");
    }

    #[test]
    fn direct_bytes_take_priority_over_nested_video() {
        let body = json!({
            "predictions": [{
                "bytesBase64Encoded": "DIRECT",
                "video": { "bytesBase64Encoded": "NESTED" }
            }]
        });
        assert_eq!(extract_base64(&body, VIDEO_SLOTS).unwrap(), "DIRECT");
    }

    #[test]
    fn inline_data_part_is_found_for_images() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "IMG0" } }
                    ]
                }
            }]
        });
        assert_eq!(extract_base64(&body, IMAGE_SLOTS).unwrap(), "IMG0");
    }

    #[test]
    fn predictions_take_priority_over_inline_data() {
        let body = json!({
            "predictions": [{ "bytesBase64Encoded": "PRED" }],
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "data": "PART" } }] }
            }]
        });
        assert_eq!(extract_base64(&body, IMAGE_SLOTS).unwrap(), "PRED");
    }

    #[test]
    fn unrecognized_shape_is_a_no_media_error() {
        let body = json!({ "predictions": [{ "unexpected": true }] });
        let err = extract_base64(&body, VIDEO_SLOTS).unwrap_err();
        assert!(matches!(err, ProviderError::NoMedia));

        let body = json!({ "done": true });
        assert!(extract_base64(&body, IMAGE_SLOTS).is_err());
    }

    #[test]
    fn first_text_part_reads_first_candidate() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "**2**" }] } }]
        });
        assert_eq!(first_text_part(&body), Some("**2**"));
        assert_eq!(first_text_part(&json!({})), None);
    }

    #[test]
    fn count_parsing_strips_formatting() {
        assert_eq!(parse_count("**2**"), 2);
        assert_eq!(parse_count(" 3 \n"), 3);
        assert_eq!(parse_count("0"), 0);
    }

    #[test]
    fn count_parsing_defaults_to_one() {
        assert_eq!(parse_count("several"), 1);
        assert_eq!(parse_count(""), 1);
    }
}
