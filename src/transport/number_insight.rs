use serde_json::Value;

use super::payload::status_of;
use crate::domain::{NetworkType, StatusCode};

pub fn encode_get_phone_type_params(number: &str) -> Vec<(String, String)> {
    vec![("number".to_owned(), number.to_owned())]
}

/// Full (`0`) and partial (`44`) lookups are both successes.
pub fn phone_type_succeeded(payload: &Value) -> bool {
    matches!(
        status_of(payload),
        Some(StatusCode::SUCCESS | StatusCode::PARTIAL)
    )
}

/// Carrier network type of a successful lookup.
///
/// Prefers the current carrier and falls back to the original one. Returns
/// `None` when no carrier reports a type or the lookup did not resolve an
/// international number.
pub fn decode_network_type(payload: &Value) -> Option<NetworkType> {
    payload.get("international_format_number")?;

    ["current_carrier", "original_carrier"]
        .iter()
        .find_map(|carrier| payload.get(carrier)?.get("network_type")?.as_str())
        .map(NetworkType::from_provider)
}
