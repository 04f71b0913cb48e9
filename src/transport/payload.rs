use serde_json::Value;

use super::xml::{XmlError, xml_to_value};
use crate::domain::{Payload, ResponseFormat, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid XML response: {0}")]
    Xml(#[from] XmlError),

    #[error("response decodes to an empty document")]
    EmptyDocument,
}

/// Decode a non-empty body into a generic payload according to `format`.
///
/// A body that decodes to JSON `null` is treated as unparseable.
pub fn decode_payload(format: ResponseFormat, body: &str) -> Result<Payload, DecodeError> {
    let value = match format {
        ResponseFormat::Json => serde_json::from_str::<Value>(body)?,
        ResponseFormat::Xml => xml_to_value(body)?,
    };
    if value.is_null() {
        return Err(DecodeError::EmptyDocument);
    }
    Ok(Payload::new(format, value))
}

/// Read a `status` field, accepting JSON numbers as well as numeric strings.
pub fn status_of(value: &Value) -> Option<StatusCode> {
    match value.get("status")? {
        Value::Number(number) => number.as_i64().map(StatusCode::new),
        Value::String(text) => text.trim().parse::<i64>().ok().map(StatusCode::new),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_json_objects() {
        let payload = decode_payload(ResponseFormat::Json, r#"{"value": 3.14}"#).unwrap();
        assert_eq!(payload.format(), ResponseFormat::Json);
        assert_eq!(payload.value(), &json!({"value": 3.14}));
    }

    #[test]
    fn json_null_and_garbage_are_errors() {
        assert!(matches!(
            decode_payload(ResponseFormat::Json, "null"),
            Err(DecodeError::EmptyDocument)
        ));
        assert!(matches!(
            decode_payload(ResponseFormat::Json, "{ not json }"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn decodes_xml_documents() {
        let payload = decode_payload(
            ResponseFormat::Xml,
            "<accountBalance><value>3.14</value><autoReload>false</autoReload></accountBalance>",
        )
        .unwrap();
        assert_eq!(payload.format(), ResponseFormat::Xml);
        assert_eq!(payload.get("value"), Some(&json!("3.14")));
        assert!(matches!(
            decode_payload(ResponseFormat::Xml, r#"{"value": 1}"#),
            Err(DecodeError::Xml(_))
        ));
    }

    #[test]
    fn status_accepts_numbers_and_numeric_strings() {
        assert_eq!(status_of(&json!({"status": 0})), Some(StatusCode::new(0)));
        assert_eq!(status_of(&json!({"status": "44"})), Some(StatusCode::new(44)));
        assert_eq!(status_of(&json!({"status": " 3 "})), Some(StatusCode::new(3)));
        assert_eq!(status_of(&json!({"status": "ok"})), None);
        assert_eq!(status_of(&json!({"status": null})), None);
        assert_eq!(status_of(&json!({})), None);
        assert_eq!(status_of(&json!([1, 2])), None);
    }
}
