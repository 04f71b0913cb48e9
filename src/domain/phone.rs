use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;
use crate::domain::value::{CountryCallingCode, Region};

/// Numbers with at most this many digits are assumed to lack a country calling code.
pub const NATIONAL_NUMBER_MAX_DIGITS: usize = 10;

/// Minimum normalized length accepted by [`PhoneNumberNormalizer::is_valid`].
pub const VALID_NUMBER_MIN_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Region → country calling code lookup used when prefixing national numbers.
///
/// The default table holds a single entry, `US → 1`.
pub struct CallingCodeTable {
    codes: BTreeMap<Region, CountryCallingCode>,
}

impl CallingCodeTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Add or replace the calling code for `region`.
    pub fn with(mut self, region: Region, code: CountryCallingCode) -> Self {
        self.codes.insert(region, code);
        self
    }

    /// Look up the calling code configured for `region`.
    pub fn get(&self, region: &Region) -> Option<CountryCallingCode> {
        self.codes.get(region).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CallingCodeTable {
    fn default() -> Self {
        Self::empty().with(Region::default(), CountryCallingCode::new(1))
    }
}

impl FromIterator<(Region, CountryCallingCode)> for CallingCodeTable {
    fn from_iter<I: IntoIterator<Item = (Region, CountryCallingCode)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Canonicalizes user input into digits-only, country-code-prefixed numbers.
///
/// ```rust
/// use nexmo::PhoneNumberNormalizer;
///
/// let normalizer = PhoneNumberNormalizer::default();
/// assert_eq!(normalizer.normalize("+1 (555) 123-4567"), "15551234567");
/// assert_eq!(normalizer.normalize("5551234567"), "15551234567");
/// ```
pub struct PhoneNumberNormalizer {
    region: Region,
    calling_code: CountryCallingCode,
}

impl PhoneNumberNormalizer {
    /// Build a normalizer for `region`, resolving its calling code through `table`.
    pub fn new(table: &CallingCodeTable, region: Region) -> Result<Self, ValidationError> {
        let calling_code = table
            .get(&region)
            .ok_or_else(|| ValidationError::UnknownRegion {
                region: region.as_str().to_owned(),
            })?;
        Ok(Self {
            region,
            calling_code,
        })
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn calling_code(&self) -> CountryCallingCode {
        self.calling_code
    }

    /// Strip non-digits and prefix national numbers with the calling code.
    ///
    /// Numbers longer than [`NATIONAL_NUMBER_MAX_DIGITS`] are assumed to already
    /// carry a country code and are returned unchanged. Empty input stays empty.
    pub fn normalize(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() || digits.len() > NATIONAL_NUMBER_MAX_DIGITS {
            return digits;
        }

        let code = self.calling_code.to_string();
        if digits.starts_with(&code) {
            digits
        } else {
            format!("{code}{digits}")
        }
    }

    /// Length heuristic: `true` iff the normalized number has at least 10 digits.
    pub fn is_valid(&self, raw: &str) -> bool {
        self.normalize(raw).len() >= VALID_NUMBER_MIN_DIGITS
    }

    /// Normalize `raw` and validate the result against the numbering plan metadata.
    pub fn parse(&self, raw: &str) -> Result<PhoneNumber, ValidationError> {
        PhoneNumber::parse(&self.normalize(raw))
    }
}

impl Default for PhoneNumberNormalizer {
    fn default() -> Self {
        Self {
            region: Region::default(),
            calling_code: CountryCallingCode::new(1),
        }
    }
}

#[derive(Debug, Clone)]
/// Normalized phone number validated against libphonenumber metadata.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    digits: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse a digits-only, country-code-prefixed number.
    fn parse(digits: &str) -> Result<Self, ValidationError> {
        if digits.is_empty() {
            return Err(ValidationError::Empty { field: "number" });
        }

        let invalid = || ValidationError::InvalidPhoneNumber {
            input: digits.to_owned(),
        };
        let parsed = phonenumber::parse(None, format!("+{digits}")).map_err(|_| invalid())?;
        if !phonenumber::is_valid(&parsed) {
            return Err(invalid());
        }

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self {
            digits: digits.to_owned(),
            e164,
            parsed,
        })
    }

    /// Digits-only form, as sent to Nexmo.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// E.164 representation (`+` followed by the digits).
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}
