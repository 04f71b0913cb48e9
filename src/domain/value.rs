use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Nexmo `api_key`.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Parameter name used by Nexmo (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Nexmo `api_secret`.
///
/// Invariant: non-empty after trimming. `Debug` never prints the value.
pub struct ApiSecret(String);

impl ApiSecret {
    /// Parameter name used by Nexmo (`api_secret`).
    pub const FIELD: &'static str = "api_secret";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated secret.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender address for outbound SMS (`from`).
///
/// Either an alphanumeric sender id or a virtual number owned by the account.
/// Invariant: non-empty after trimming. The value is sent as-is, never normalized.
pub struct SenderId(String);

impl SenderId {
    /// Parameter name used by Nexmo (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Region key for the country calling code table, e.g. `US`.
///
/// Invariant: non-empty, stored upper-cased.
pub struct Region(String);

impl Region {
    /// Configuration field name (`region`).
    pub const FIELD: &'static str = "region";

    /// Create a validated [`Region`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the region key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    /// `US`, the only region in the default calling code table.
    fn default() -> Self {
        Self("US".to_owned())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// International country calling code, e.g. `1` for the North American plan.
pub struct CountryCallingCode(u16);

impl CountryCallingCode {
    /// Construct a calling code from its numeric value.
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric value.
    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for CountryCallingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Provider status code as found in `status` fields.
///
/// Preserved as-is even when unknown to this crate.
pub struct StatusCode(i64);

impl StatusCode {
    /// `0`: request accepted / lookup returned full data.
    pub const SUCCESS: Self = Self(0);
    /// `44`: number insight lookup returned partial data.
    pub const PARTIAL: Self = Self(44);

    /// Construct a status code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Nexmo.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known_kind(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// Returns `true` for status `0`.
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known Nexmo status codes shared by the SMS, voice and number insight APIs.
pub enum KnownStatusCode {
    Success,
    Throttled,
    MissingParameters,
    InvalidParameters,
    InvalidCredentials,
    InternalError,
    InvalidMessage,
    NumberBarred,
    PartnerAccountBarred,
    PartnerQuotaExceeded,
    AccountNotEnabledForRest,
    MessageTooLong,
    CommunicationFailed,
    InvalidSignature,
    InvalidSenderAddress,
    InvalidTtl,
    FacilityNotAllowed,
    InvalidMessageClass,
    LookupNotHandled,
    PartialLookup,
    LookupUnavailable,
}

impl KnownStatusCode {
    /// Convert a raw Nexmo integer code into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::Success,
            1 => Self::Throttled,
            2 => Self::MissingParameters,
            3 => Self::InvalidParameters,
            4 => Self::InvalidCredentials,
            5 => Self::InternalError,
            6 => Self::InvalidMessage,
            7 => Self::NumberBarred,
            8 => Self::PartnerAccountBarred,
            9 => Self::PartnerQuotaExceeded,
            11 => Self::AccountNotEnabledForRest,
            12 => Self::MessageTooLong,
            13 => Self::CommunicationFailed,
            14 => Self::InvalidSignature,
            15 => Self::InvalidSenderAddress,
            16 => Self::InvalidTtl,
            19 => Self::FacilityNotAllowed,
            20 => Self::InvalidMessageClass,
            43 => Self::LookupNotHandled,
            44 => Self::PartialLookup,
            45 => Self::LookupUnavailable,
            _ => return None,
        })
    }

    /// Whether this status indicates invalid credentials.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidSignature)
    }
}
