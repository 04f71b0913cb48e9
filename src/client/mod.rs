//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod classify;
mod config;

use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub use config::{
    ENV_API_KEY, ENV_API_SECRET, ENV_FROM, ENV_REGION, ENV_RESPONSE_FORMAT, ENV_VERIFY_TLS,
    NexmoConfig,
};

use crate::domain::{
    ApiKey, ApiSecret, CallingCodeTable, HttpMethod, NetworkType, Operation, Payload, PhoneNumber,
    PhoneNumberNormalizer, Region, ResponseFormat, SendSms, SendTextToSpeech, SenderId,
    ValidationError,
};
use crate::transport::{self, ApiRequest, BaseUrls, Endpoint};

/// Connect timeout applied by the default transport.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Total request timeout applied by the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug, Clone)]
struct TransportFailure {
    code: TransportErrorCode,
    message: String,
}

impl TransportFailure {
    fn from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            TransportErrorCode::Timeout
        } else if err.is_connect() {
            TransportErrorCode::Connect
        } else if err.is_redirect() {
            TransportErrorCode::Redirect
        } else if err.is_body() || err.is_decode() {
            TransportErrorCode::Body
        } else if err.is_builder() {
            TransportErrorCode::Builder
        } else {
            TransportErrorCode::Request
        };
        // The URL carries the credentials in its query string.
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { code, message }
    }
}

trait HttpTransport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportFailure>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportFailure> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.clone()),
            HttpMethod::Post => {
                let builder = self.client.post(request.url.clone());
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder.send().map_err(TransportFailure::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(TransportFailure::from_reqwest)?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Static key/secret pair appended to every request.
pub struct Credentials {
    api_key: ApiKey,
    api_secret: ApiSecret,
}

impl Credentials {
    /// Validate both parts; either one missing is a configuration error.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            api_secret: ApiSecret::new(api_secret)?,
        })
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    fn push_params(&self, params: &mut Vec<(String, String)>) {
        params.push((ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned()));
        params.push((
            ApiSecret::FIELD.to_owned(),
            self.api_secret.as_str().to_owned(),
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Transport-level failure category.
pub enum TransportErrorCode {
    Connect,
    Timeout,
    Redirect,
    Body,
    Builder,
    Request,
}

impl TransportErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Redirect => "redirect",
            Self::Body => "body",
            Self::Builder => "builder",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for TransportErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Coarse classification of a [`NexmoError`].
pub enum ErrorKind {
    Configuration,
    Transport,
    EmptyResponse,
    Parse,
    Operation,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NexmoClient`].
///
/// Only [`NexmoError::Configuration`] and [`NexmoError::InvalidUrl`] are
/// produced at construction time; every other variant is a per-call outcome.
pub enum NexmoError {
    /// Missing credentials or otherwise invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// A configured base URL does not parse.
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection or protocol failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {code}: {message}")]
    Transport {
        code: TransportErrorCode,
        message: String,
    },

    /// The call completed but the body was empty.
    #[error("Invalid response from API")]
    EmptyResponse,

    /// The body could not be decoded in the configured response format.
    #[error("Could not parse response from API")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Well-formed response reporting a provider-level failure.
    #[error("{operation} failed: {payload}")]
    Operation {
        operation: Operation,
        /// The response payload, serialized as JSON.
        payload: String,
    },

    /// A phone type lookup succeeded but did not say which network type the number has.
    #[error("could not determine phone type: {payload}")]
    UndeterminedPhoneType { payload: String },
}

impl NexmoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::InvalidUrl(_) => ErrorKind::Configuration,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::EmptyResponse => ErrorKind::EmptyResponse,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Operation { .. } | Self::UndeterminedPhoneType { .. } => ErrorKind::Operation,
        }
    }

    /// Short diagnostic string, as reported by [`NexmoClient::last_error`].
    ///
    /// Operation errors report the serialized payload.
    pub fn detail(&self) -> String {
        match self {
            Self::Transport { code, message } => format!("{code}: {message}"),
            Self::Operation { payload, .. } => payload.clone(),
            Self::UndeterminedPhoneType { .. } => "could not determine phone type".to_owned(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Snapshot of the most recent call, kept for callers that inspect errors after the fact.
///
/// Overwritten by every call. A successful call clears `last_error`.
pub struct ClientErrorState {
    pub last_error: Option<String>,
    /// Raw body of the last response, `None` when the transport failed.
    pub last_response: Option<String>,
}

#[derive(Debug, Clone)]
/// Builder for [`NexmoClient`].
///
/// Use this when you need a default sender, another calling code region,
/// XML responses, or custom transport settings.
pub struct NexmoClientBuilder {
    credentials: Credentials,
    from: Option<SenderId>,
    calling_codes: CallingCodeTable,
    region: Region,
    response_format: ResponseFormat,
    rest_base_url: String,
    api_base_url: String,
    verify_tls: bool,
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: Option<String>,
}

impl NexmoClientBuilder {
    /// Create a builder with the production endpoints, JSON responses and TLS verification on.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            from: None,
            calling_codes: CallingCodeTable::default(),
            region: Region::default(),
            response_format: ResponseFormat::default(),
            rest_base_url: transport::DEFAULT_REST_BASE_URL.to_owned(),
            api_base_url: transport::DEFAULT_API_BASE_URL.to_owned(),
            verify_tls: true,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Default sender used by [`NexmoClient::send_sms`] when the request has none.
    pub fn from(mut self, from: SenderId) -> Self {
        self.from = Some(from);
        self
    }

    /// Replace the region → calling code table.
    pub fn calling_codes(mut self, table: CallingCodeTable) -> Self {
        self.calling_codes = table;
        self
    }

    /// Region whose calling code prefixes national numbers.
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Override the `rest.nexmo.com` base URL (account and SMS calls).
    pub fn rest_base_url(mut self, url: impl Into<String>) -> Self {
        self.rest_base_url = url.into();
        self
    }

    /// Override the `api.nexmo.com` base URL (number insight and voice calls).
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Verify the server's TLS certificate. Enabled by default.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`NexmoClient`].
    pub fn build(self) -> Result<NexmoClient, NexmoError> {
        let base_urls = BaseUrls::new(self.rest_base_url, self.api_base_url);
        base_urls.validate()?;
        let normalizer = PhoneNumberNormalizer::new(&self.calling_codes, self.region)?;

        if !self.verify_tls {
            tracing::warn!("TLS certificate verification is disabled for the Nexmo client");
        }

        let mut builder = reqwest::blocking::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NexmoError::from(TransportFailure::from_reqwest(err)))?;

        Ok(NexmoClient {
            credentials: self.credentials,
            from: self.from,
            normalizer,
            response_format: self.response_format,
            base_urls,
            http: Arc::new(ReqwestTransport { client }),
            state: Mutex::new(ClientErrorState::default()),
        })
    }
}

impl From<TransportFailure> for NexmoError {
    fn from(failure: TransportFailure) -> Self {
        Self::Transport {
            code: failure.code,
            message: failure.message,
        }
    }
}

/// High-level Nexmo client.
///
/// Every call is a single blocking HTTP round trip and returns its outcome
/// directly, so one client can be shared between threads. The
/// [`last_error`](Self::last_error) / [`last_response`](Self::last_response)
/// accessors reflect whichever call finished last.
///
/// ```rust,no_run
/// use nexmo::{Credentials, NexmoClient, SendSms};
///
/// let client = NexmoClient::new(Credentials::new("key", "secret")?)?;
/// let payload = client.send_sms(SendSms::new("555-123-4567", "hi"))?;
/// println!("{}", payload.to_json_string());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct NexmoClient {
    credentials: Credentials,
    from: Option<SenderId>,
    normalizer: PhoneNumberNormalizer,
    response_format: ResponseFormat,
    base_urls: BaseUrls,
    http: Arc<dyn HttpTransport>,
    state: Mutex<ClientErrorState>,
}

impl fmt::Debug for NexmoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NexmoClient")
            .field("credentials", &self.credentials)
            .field("from", &self.from)
            .field("normalizer", &self.normalizer)
            .field("response_format", &self.response_format)
            .field("base_urls", &self.base_urls)
            .finish_non_exhaustive()
    }
}

impl NexmoClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`NexmoClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, NexmoError> {
        NexmoClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> NexmoClientBuilder {
        NexmoClientBuilder::new(credentials)
    }

    /// Build a client from host configuration.
    pub fn from_config(config: NexmoConfig) -> Result<Self, NexmoError> {
        config.into_builder()?.build()
    }

    /// Build a client from `NEXMO_*` environment variables.
    pub fn from_env() -> Result<Self, NexmoError> {
        Self::from_config(NexmoConfig::from_env()?)
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    /// Switch the format subsequent responses are requested and decoded in.
    pub fn set_response_format(&mut self, format: ResponseFormat) {
        self.response_format = format;
    }

    /// Account balance (`account/get-balance`).
    ///
    /// Any decodable body is a success.
    pub fn get_balance(&self) -> Result<Payload, NexmoError> {
        self.execute(
            Operation::GetBalance,
            transport::encode_get_balance_params(),
        )
    }

    /// Number insight lookup (`ni/standard`) for a normalized `number`.
    ///
    /// Partial lookups (status `44`) are returned as successes.
    pub fn get_phone_type(&self, number: &str) -> Result<Payload, NexmoError> {
        let number = self.normalizer.normalize(number);
        self.execute(
            Operation::GetPhoneType,
            transport::encode_get_phone_type_params(&number),
        )
    }

    /// Send a text message.
    ///
    /// `to` is normalized; `from` falls back to the configured default sender.
    /// Succeeds iff the first message part reports status `0`.
    pub fn send_sms(&self, request: SendSms) -> Result<Payload, NexmoError> {
        let to = self.normalizer.normalize(&request.to);
        let from = request.from.as_ref().or(self.from.as_ref());
        self.execute(
            Operation::SendSms,
            transport::encode_send_sms_params(from, &to, &request.text),
        )
    }

    /// Place a text-to-speech call. Both numbers are normalized.
    pub fn send_text_to_speech(&self, request: SendTextToSpeech) -> Result<Payload, NexmoError> {
        let from = self.normalizer.normalize(&request.from);
        let to = self.normalizer.normalize(&request.to);
        self.execute(
            Operation::SendTextToSpeech,
            transport::encode_send_text_to_speech_params(
                &from,
                &to,
                &request.text,
                request.repeat,
            ),
        )
    }

    /// Network type of `number`, from the current carrier or else the original one.
    ///
    /// Fails with [`NexmoError::UndeterminedPhoneType`] when the lookup does not
    /// report a network type or an international number.
    pub fn network_type(&self, number: &str) -> Result<NetworkType, NexmoError> {
        let payload = self.get_phone_type(number)?;
        match transport::decode_network_type(payload.value()) {
            Some(network_type) => Ok(network_type),
            None => {
                let err = NexmoError::UndeterminedPhoneType {
                    payload: payload.to_json_string(),
                };
                self.lock_state().last_error = Some(err.detail());
                Err(err)
            }
        }
    }

    /// `true` iff `number` is on a mobile or virtual network.
    ///
    /// Any failure, including an undetermined type, yields `false`; see
    /// [`last_error`](Self::last_error) for the reason.
    pub fn is_mobile_phone(&self, number: &str) -> bool {
        self.network_type(number)
            .is_ok_and(|network_type| network_type.is_mobile())
    }

    /// Length heuristic: the normalized number has at least 10 digits.
    pub fn is_valid_phone(&self, number: &str) -> bool {
        self.normalizer.is_valid(number)
    }

    /// Digits-only, country-code-prefixed form of `number`.
    pub fn normalize_number(&self, number: &str) -> String {
        self.normalizer.normalize(number)
    }

    /// Normalize `number` and validate it against the numbering plan metadata.
    pub fn parse_phone_number(&self, number: &str) -> Result<PhoneNumber, ValidationError> {
        self.normalizer.parse(number)
    }

    /// Issue `operation` with caller-supplied parameters and HTTP method.
    ///
    /// Credentials are appended to `params`. With [`HttpMethod::Post`] the
    /// parameters are sent as a JSON body instead of the query string.
    pub fn call(
        &self,
        operation: Operation,
        method: HttpMethod,
        params: Vec<(String, String)>,
    ) -> Result<Payload, NexmoError> {
        let (raw, outcome) = self.dispatch(operation, method, params);
        self.record(raw, &outcome);
        outcome
    }

    /// Snapshot of the compatibility error state.
    pub fn error_state(&self) -> ClientErrorState {
        self.lock_state().clone()
    }

    /// Error detail of the last call, `None` if it succeeded.
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// Raw body of the last response.
    pub fn last_response(&self) -> Option<String> {
        self.lock_state().last_response.clone()
    }

    fn execute(
        &self,
        operation: Operation,
        params: Vec<(String, String)>,
    ) -> Result<Payload, NexmoError> {
        let method = Endpoint::for_operation(operation).method;
        self.call(operation, method, params)
    }

    fn dispatch(
        &self,
        operation: Operation,
        method: HttpMethod,
        mut params: Vec<(String, String)>,
    ) -> (Option<String>, Result<Payload, NexmoError>) {
        let url = match Endpoint::for_operation(operation).url(&self.base_urls, self.response_format)
        {
            Ok(url) => url,
            Err(err) => return (None, Err(err.into())),
        };

        self.credentials.push_params(&mut params);
        let request = ApiRequest::new(method, url, params);
        tracing::debug!(
            %operation,
            method = ?request.method,
            url = %request.redacted_url(),
            "sending Nexmo request"
        );

        let result = self.http.send(&request);
        let raw = result.as_ref().ok().map(|response| response.body.clone());
        if let Ok(response) = &result {
            tracing::debug!(%operation, status = response.status, "received Nexmo response");
        }

        let outcome = classify::classify(result, self.response_format, operation);
        if let Err(err) = &outcome {
            tracing::warn!(%operation, kind = ?err.kind(), error = %err, "Nexmo request failed");
        }
        (raw, outcome)
    }

    fn record(&self, raw: Option<String>, outcome: &Result<Payload, NexmoError>) {
        let mut state = self.lock_state();
        state.last_response = raw;
        state.last_error = outcome.as_ref().err().map(NexmoError::detail);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ClientErrorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
