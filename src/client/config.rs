//! Client configuration as loaded by a host application.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::{Credentials, NexmoClient, NexmoClientBuilder, NexmoError};
use crate::domain::{CallingCodeTable, CountryCallingCode, Region, ResponseFormat, SenderId};

pub const ENV_API_KEY: &str = "NEXMO_API_KEY";
pub const ENV_API_SECRET: &str = "NEXMO_API_SECRET";
pub const ENV_FROM: &str = "NEXMO_FROM";
pub const ENV_REGION: &str = "NEXMO_REGION";
pub const ENV_RESPONSE_FORMAT: &str = "NEXMO_RESPONSE_FORMAT";
pub const ENV_VERIFY_TLS: &str = "NEXMO_VERIFY_TLS";

#[derive(Clone, Deserialize)]
#[serde(default)]
/// Configuration for [`NexmoClient`].
///
/// Deserializable from whatever format the host application uses. Missing
/// credentials deserialize as empty strings and are rejected by
/// [`NexmoConfig::into_builder`].
pub struct NexmoConfig {
    pub api_key: String,
    pub api_secret: String,
    /// Default sender for SMS when a request does not set one.
    pub from: Option<String>,
    /// Region whose calling code prefixes national numbers (`US` when unset).
    pub region: Option<String>,
    /// Extra region → calling code entries, merged over the default `US → 1`.
    pub calling_codes: BTreeMap<String, u16>,
    pub response_format: ResponseFormat,
    pub verify_tls: bool,
    pub rest_base_url: Option<String>,
    pub api_base_url: Option<String>,
}

impl Default for NexmoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            from: None,
            region: None,
            calling_codes: BTreeMap::new(),
            response_format: ResponseFormat::default(),
            verify_tls: true,
            rest_base_url: None,
            api_base_url: None,
        }
    }
}

impl fmt::Debug for NexmoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NexmoConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("from", &self.from)
            .field("region", &self.region)
            .field("calling_codes", &self.calling_codes)
            .field("response_format", &self.response_format)
            .field("verify_tls", &self.verify_tls)
            .field("rest_base_url", &self.rest_base_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl NexmoConfig {
    /// Read configuration from `NEXMO_*` environment variables.
    pub fn from_env() -> Result<Self, NexmoError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NexmoError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = Self {
            api_key: lookup(ENV_API_KEY).unwrap_or_default(),
            api_secret: lookup(ENV_API_SECRET).unwrap_or_default(),
            from: non_empty(ENV_FROM),
            region: non_empty(ENV_REGION),
            ..Self::default()
        };
        if let Some(format) = non_empty(ENV_RESPONSE_FORMAT) {
            config.response_format = format.parse()?;
        }
        if let Some(verify) = non_empty(ENV_VERIFY_TLS) {
            config.verify_tls = !matches!(
                verify.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        Ok(config)
    }

    /// Validate the configuration and turn it into a client builder.
    pub fn into_builder(self) -> Result<NexmoClientBuilder, NexmoError> {
        let credentials = Credentials::new(self.api_key, self.api_secret)?;

        let mut table = CallingCodeTable::default();
        for (region, code) in self.calling_codes {
            table = table.with(Region::new(region)?, CountryCallingCode::new(code));
        }

        let mut builder = NexmoClient::builder(credentials)
            .calling_codes(table)
            .response_format(self.response_format)
            .verify_tls(self.verify_tls);

        if let Some(region) = self.region {
            builder = builder.region(Region::new(region)?);
        }
        if let Some(from) = self.from {
            builder = builder.from(SenderId::new(from)?);
        }
        if let Some(url) = self.rest_base_url {
            builder = builder.rest_base_url(url);
        }
        if let Some(url) = self.api_base_url {
            builder = builder.api_base_url(url);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::client::ErrorKind;
    use crate::domain::ValidationError;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn env_lookup_reads_all_fields() {
        let config = NexmoConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_FROM, "MyCompany20"),
            (ENV_REGION, "us"),
            (ENV_RESPONSE_FORMAT, "xml"),
            (ENV_VERIFY_TLS, "false"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(config.from.as_deref(), Some("MyCompany20"));
        assert_eq!(config.region.as_deref(), Some("us"));
        assert_eq!(config.response_format, ResponseFormat::Xml);
        assert!(!config.verify_tls);
    }

    #[test]
    fn env_lookup_defaults() {
        let config = NexmoConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_FROM, "  "),
        ]))
        .unwrap();
        assert_eq!(config.from, None);
        assert_eq!(config.response_format, ResponseFormat::Json);
        assert!(config.verify_tls);
    }

    #[test]
    fn env_lookup_rejects_unknown_format() {
        let err = NexmoConfig::from_lookup(lookup(&[(ENV_RESPONSE_FORMAT, "csv")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn missing_credentials_are_fatal() {
        let config = NexmoConfig::from_lookup(lookup(&[(ENV_API_SECRET, "secret")])).unwrap();
        let err = config.into_builder().unwrap_err();
        assert!(matches!(
            err,
            NexmoError::Configuration(ValidationError::Empty { field: "api_key" })
        ));

        let config = NexmoConfig::from_lookup(lookup(&[(ENV_API_KEY, "key")])).unwrap();
        let err = config.into_builder().unwrap_err();
        assert!(matches!(
            err,
            NexmoError::Configuration(ValidationError::Empty {
                field: "api_secret"
            })
        ));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: NexmoConfig = serde_json::from_str(
            r#"{
                "api_key": "key",
                "api_secret": "secret",
                "region": "GB",
                "calling_codes": {"GB": 44}
            }"#,
        )
        .unwrap();
        assert!(config.verify_tls);
        assert_eq!(config.response_format, ResponseFormat::Json);
        assert_eq!(config.calling_codes.get("GB"), Some(&44));

        let client = NexmoClient::from_config(config).unwrap();
        assert_eq!(client.normalize_number("7946 0958"), "4479460958");
    }

    #[test]
    fn unknown_region_without_calling_code_is_rejected() {
        let config = NexmoConfig {
            api_key: "key".to_owned(),
            api_secret: "secret".to_owned(),
            region: Some("FR".to_owned()),
            ..NexmoConfig::default()
        };
        let err = NexmoClient::from_config(config).unwrap_err();
        assert!(matches!(
            err,
            NexmoError::Configuration(ValidationError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = NexmoConfig {
            api_key: "key".to_owned(),
            api_secret: "hunter2".to_owned(),
            ..NexmoConfig::default()
        };
        let printed = format!("{config:?}");
        assert!(printed.contains("key"));
        assert!(!printed.contains("hunter2"));
    }
}
