//! Domain layer: strong types with validation and invariants (no I/O).

mod phone;
mod request;
mod response;
mod validation;
mod value;

pub use phone::{
    CallingCodeTable, NATIONAL_NUMBER_MAX_DIGITS, PhoneNumber, PhoneNumberNormalizer,
    VALID_NUMBER_MIN_DIGITS,
};
pub use request::{HttpMethod, Operation, SendSms, SendTextToSpeech};
pub use response::{NetworkType, Payload, ResponseFormat};
pub use validation::ValidationError;
pub use value::{
    ApiKey, ApiSecret, CountryCallingCode, KnownStatusCode, Region, SenderId, StatusCode,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn api_secret_rejects_empty() {
        assert!(matches!(
            ApiSecret::new(""),
            Err(ValidationError::Empty {
                field: ApiSecret::FIELD
            })
        ));
    }

    #[test]
    fn send_sms_builder_sets_sender() {
        let request = SendSms::new("555-123-4567", "hi");
        assert!(request.from.is_none());

        let request = request.from(SenderId::new("MyCompany20").unwrap());
        assert_eq!(
            request.from.as_ref().map(SenderId::as_str),
            Some("MyCompany20")
        );
    }

    #[test]
    fn text_to_speech_repeat_is_optional() {
        let request = SendTextToSpeech::new("5550001111", "5551234567", "hello");
        assert_eq!(request.repeat, None);
        assert_eq!(request.repeat(3).repeat, Some(3));
    }

    #[test]
    fn calling_code_table_collects_from_pairs() {
        let table: CallingCodeTable = [
            (Region::new("US").unwrap(), CountryCallingCode::new(1)),
            (Region::new("RU").unwrap(), CountryCallingCode::new(7)),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(&Region::new("ru").unwrap()),
            Some(CountryCallingCode::new(7))
        );
        assert!(CallingCodeTable::empty().is_empty());
    }
}
