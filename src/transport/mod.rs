//! Transport layer: endpoints, wire-format details and per-operation success rules.

mod account;
mod endpoint;
mod number_insight;
mod payload;
mod request;
mod sms;
mod tts;
mod xml;

pub use account::encode_get_balance_params;
pub use endpoint::{BaseUrls, DEFAULT_API_BASE_URL, DEFAULT_REST_BASE_URL, Endpoint};
pub use number_insight::{decode_network_type, encode_get_phone_type_params};
pub use payload::decode_payload;
pub use request::ApiRequest;
pub use sms::encode_send_sms_params;
pub use tts::encode_send_text_to_speech_params;

use crate::domain::{Operation, Payload};

/// Apply the success predicate of `operation` to a parsed payload.
pub fn is_success(operation: Operation, payload: &Payload) -> bool {
    let value = payload.value();
    match operation {
        Operation::GetBalance => account::balance_succeeded(value),
        Operation::GetPhoneType => number_insight::phone_type_succeeded(value),
        Operation::SendSms => sms::sms_succeeded(value),
        Operation::SendTextToSpeech => tts::text_to_speech_succeeded(value),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::ResponseFormat;

    #[test]
    fn dispatches_to_operation_predicates() {
        let ok = Payload::new(ResponseFormat::Json, json!({"status": 0}));
        let partial = Payload::new(ResponseFormat::Json, json!({"status": 44}));

        assert!(is_success(Operation::GetBalance, &partial));
        assert!(is_success(Operation::GetPhoneType, &partial));
        assert!(!is_success(Operation::SendTextToSpeech, &partial));
        assert!(is_success(Operation::SendTextToSpeech, &ok));
        assert!(!is_success(Operation::SendSms, &ok));
    }
}
