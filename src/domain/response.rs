use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Format the provider's response body is decoded from.
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(ValidationError::UnknownResponseFormat {
                input: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Successfully parsed provider response.
///
/// The shape is provider-defined, so the body is kept as a generic tree. XML
/// bodies are converted to the same tree: elements become objects, text-only
/// elements become strings and repeated elements become arrays.
pub struct Payload {
    format: ResponseFormat,
    value: Value,
}

impl Payload {
    pub fn new(format: ResponseFormat, value: Value) -> Self {
        Self { format, value }
    }

    /// Format the payload was decoded from.
    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Top-level field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// Nested field lookup, e.g. `["current_carrier", "network_type"]`.
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.value, |value, key| value.get(key))
    }

    /// Compact JSON serialization, used as the detail of operation errors.
    pub fn to_json_string(&self) -> String {
        self.value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Carrier category reported by number insight.
pub enum NetworkType {
    Mobile,
    Landline,
    Virtual,
    Premium,
    TollFree,
    Other(String),
}

impl NetworkType {
    /// Map the provider's `network_type` string.
    pub fn from_provider(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mobile" => Self::Mobile,
            "landline" => Self::Landline,
            "virtual" => Self::Virtual,
            "premium" => Self::Premium,
            "toll-free" => Self::TollFree,
            _ => Self::Other(value.to_owned()),
        }
    }

    /// `true` for carrier types that can receive SMS (mobile and virtual).
    pub fn is_mobile(&self) -> bool {
        matches!(self, Self::Mobile | Self::Virtual)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_format_parses_known_values() {
        assert_eq!("json".parse::<ResponseFormat>(), Ok(ResponseFormat::Json));
        assert_eq!(" XML ".parse::<ResponseFormat>(), Ok(ResponseFormat::Xml));
        assert!(matches!(
            "yaml".parse::<ResponseFormat>(),
            Err(ValidationError::UnknownResponseFormat { .. })
        ));
        assert_eq!(ResponseFormat::default(), ResponseFormat::Json);
    }

    #[test]
    fn payload_pointer_walks_nested_objects() {
        let payload = Payload::new(
            ResponseFormat::Json,
            json!({"current_carrier": {"network_type": "mobile"}}),
        );
        assert_eq!(
            payload.pointer(&["current_carrier", "network_type"]),
            Some(&json!("mobile"))
        );
        assert_eq!(payload.pointer(&["original_carrier", "network_type"]), None);
        assert_eq!(
            payload.to_json_string(),
            r#"{"current_carrier":{"network_type":"mobile"}}"#
        );
    }

    #[test]
    fn network_type_mobile_classification() {
        assert!(NetworkType::from_provider("mobile").is_mobile());
        assert!(NetworkType::from_provider("Virtual").is_mobile());
        assert!(!NetworkType::from_provider("landline").is_mobile());
        assert!(!NetworkType::from_provider("premium").is_mobile());
        assert_eq!(NetworkType::from_provider("toll-free"), NetworkType::TollFree);
        assert!(!NetworkType::from_provider("pager").is_mobile());
    }
}
