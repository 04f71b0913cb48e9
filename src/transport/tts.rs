use serde_json::Value;

use super::payload::status_of;

pub fn encode_send_text_to_speech_params(
    from: &str,
    to: &str,
    text: &str,
    repeat: Option<u32>,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("from".to_owned(), from.to_owned()),
        ("to".to_owned(), to.to_owned()),
        ("text".to_owned(), text.to_owned()),
    ];
    if let Some(repeat) = repeat {
        params.push(("repeat".to_owned(), repeat.to_string()));
    }
    params
}

pub fn text_to_speech_succeeded(payload: &Value) -> bool {
    status_of(payload).is_some_and(|status| status.is_success())
}
