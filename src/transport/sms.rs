use serde_json::Value;

use super::payload::status_of;
use crate::domain::SenderId;

pub fn encode_send_sms_params(
    from: Option<&SenderId>,
    to: &str,
    text: &str,
) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    if let Some(from) = from {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    params.push(("to".to_owned(), to.to_owned()));
    params.push(("text".to_owned(), text.to_owned()));
    params.push(("type".to_owned(), "text".to_owned()));
    params
}

/// Success iff the first message part reports status `0`.
pub fn sms_succeeded(payload: &Value) -> bool {
    first_message(payload)
        .and_then(status_of)
        .is_some_and(|status| status.is_success())
}

/// First entry of `messages`.
///
/// JSON responses carry `messages` as an array. XML responses nest the entries
/// as `<messages><message/>...</messages>`, which converts to an object with a
/// `message` field holding one object or an array of them.
fn first_message(payload: &Value) -> Option<&Value> {
    match payload.get("messages")? {
        Value::Array(messages) => messages.first(),
        Value::Object(wrapper) => match wrapper.get("message")? {
            Value::Array(messages) => messages.first(),
            message => Some(message),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_params_with_and_without_sender() {
        let from = SenderId::new("MyCompany20").unwrap();
        let params = encode_send_sms_params(Some(&from), "15551234567", "hello");
        assert_eq!(
            params,
            vec![
                ("from".to_owned(), "MyCompany20".to_owned()),
                ("to".to_owned(), "15551234567".to_owned()),
                ("text".to_owned(), "hello".to_owned()),
                ("type".to_owned(), "text".to_owned()),
            ]
        );

        let params = encode_send_sms_params(None, "15551234567", "hello");
        assert!(!params.iter().any(|(k, _)| k == "from"));
    }

    #[test]
    fn first_message_status_decides_success() {
        assert!(sms_succeeded(&json!({"message-count": "1", "messages": [{"status": 0}]})));
        assert!(sms_succeeded(&json!({"messages": [{"status": "0"}]})));
        assert!(!sms_succeeded(&json!({"messages": [{"status": 1}]})));
        assert!(!sms_succeeded(&json!({"messages": [{"status": "2", "error-text": "Missing to"}]})));
    }

    #[test]
    fn only_the_first_message_part_counts() {
        assert!(sms_succeeded(&json!({"messages": [{"status": "0"}, {"status": "5"}]})));
        assert!(!sms_succeeded(&json!({"messages": [{"status": "5"}, {"status": "0"}]})));
    }

    #[test]
    fn missing_or_empty_messages_fail() {
        assert!(!sms_succeeded(&json!({})));
        assert!(!sms_succeeded(&json!({"messages": []})));
        assert!(!sms_succeeded(&json!({"messages": [{}]})));
        assert!(!sms_succeeded(&json!({"status": 0})));
    }

    #[test]
    fn xml_shaped_messages_are_understood() {
        assert!(sms_succeeded(&json!({"messages": {"count": "1", "message": {"status": "0"}}})));
        assert!(sms_succeeded(&json!({"messages": {"message": [{"status": "0"}, {"status": "1"}]}})));
        assert!(!sms_succeeded(&json!({"messages": {"count": "1", "message": {"status": "4"}}})));
    }
}
