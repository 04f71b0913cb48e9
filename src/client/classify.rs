//! Maps a raw transport result onto the success/error model.

use super::{HttpResponse, NexmoError, TransportFailure};
use crate::domain::{Operation, Payload, ResponseFormat};
use crate::transport;

/// Classify one transport round trip for `operation`.
///
/// The checks run in order and the first failing one decides the error:
/// transport failure, empty body, undecodable body, failed success predicate.
/// The HTTP status code does not take part; provider errors arrive as regular
/// bodies and are caught by the predicate.
pub(super) fn classify(
    result: Result<HttpResponse, TransportFailure>,
    format: ResponseFormat,
    operation: Operation,
) -> Result<Payload, NexmoError> {
    let response = result.map_err(|failure| NexmoError::Transport {
        code: failure.code,
        message: failure.message,
    })?;

    if response.body.trim().is_empty() {
        return Err(NexmoError::EmptyResponse);
    }

    let payload = transport::decode_payload(format, &response.body)
        .map_err(|err| NexmoError::Parse(Box::new(err)))?;

    if !transport::is_success(operation, &payload) {
        return Err(NexmoError::Operation {
            operation,
            payload: payload.to_json_string(),
        });
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::{ErrorKind, TransportErrorCode};

    fn ok(body: &str) -> Result<HttpResponse, TransportFailure> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_owned(),
        })
    }

    fn classify_json(body: &str, operation: Operation) -> Result<Payload, NexmoError> {
        classify(ok(body), ResponseFormat::Json, operation)
    }

    #[test]
    fn transport_failure_wins() {
        let failure = TransportFailure {
            code: TransportErrorCode::Timeout,
            message: "operation timed out".to_owned(),
        };
        let err = classify(Err(failure), ResponseFormat::Json, Operation::GetBalance).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.detail(), "timeout: operation timed out");
    }

    #[test]
    fn empty_body_is_empty_response() {
        for body in ["", "   \n"] {
            let err = classify_json(body, Operation::GetBalance).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EmptyResponse);
            assert_eq!(err.detail(), "Invalid response from API");
        }
    }

    #[test]
    fn undecodable_body_is_parse_error() {
        for body in ["{ not json }", "null", "<html>"] {
            let err = classify_json(body, Operation::GetBalance).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "body {body:?}");
            assert_eq!(err.detail(), "Could not parse response from API");
        }

        let err = classify(ok("{\"status\":0}"), ResponseFormat::Xml, Operation::GetBalance)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn failed_predicate_carries_serialized_payload() {
        let err = classify_json(r#"{"status": 1}"#, Operation::GetPhoneType).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert_eq!(err.detail(), r#"{"status":1}"#);
        assert!(matches!(
            err,
            NexmoError::Operation {
                operation: Operation::GetPhoneType,
                ..
            }
        ));
    }

    #[test]
    fn phone_type_accepts_full_and_partial() {
        assert!(classify_json(r#"{"status": 0}"#, Operation::GetPhoneType).is_ok());
        assert!(classify_json(r#"{"status": 44}"#, Operation::GetPhoneType).is_ok());
        assert!(classify_json(r#"{"status": 1}"#, Operation::GetPhoneType).is_err());
    }

    #[test]
    fn send_sms_checks_first_message() {
        assert!(classify_json(r#"{"messages":[{"status":0}]}"#, Operation::SendSms).is_ok());
        assert!(classify_json(r#"{"messages":[{"status":1}]}"#, Operation::SendSms).is_err());
        assert!(classify_json(r#"{"message-count":"0"}"#, Operation::SendSms).is_err());
    }

    #[test]
    fn balance_succeeds_without_status() {
        let payload = classify_json(r#"{"value": 3.14, "autoReload": false}"#, Operation::GetBalance)
            .unwrap();
        assert_eq!(payload.get("value"), Some(&json!(3.14)));
    }

    #[test]
    fn http_error_status_with_body_is_still_classified_by_payload() {
        let response = Ok(HttpResponse {
            status: 401,
            body: r#"{"status": "4", "error_text": "Bad Credentials"}"#.to_owned(),
        });
        let err = classify(response, ResponseFormat::Json, Operation::SendTextToSpeech).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
    }

    #[test]
    fn xml_bodies_are_classified_like_json() {
        let xml = r#"<mt-submission-response><messages count="1"><message><status>0</status></message></messages></mt-submission-response>"#;
        let payload = classify(ok(xml), ResponseFormat::Xml, Operation::SendSms).unwrap();
        assert_eq!(payload.format(), ResponseFormat::Xml);
    }
}
