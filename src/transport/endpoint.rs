use url::Url;

use crate::domain::{HttpMethod, Operation, ResponseFormat};

pub const DEFAULT_REST_BASE_URL: &str = "https://rest.nexmo.com/";
pub const DEFAULT_API_BASE_URL: &str = "https://api.nexmo.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrl {
    /// `rest.nexmo.com`: account and SMS APIs.
    Rest,
    /// `api.nexmo.com`: number insight and voice APIs.
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fixed(&'static str),
    /// The command names the response format (`json` / `xml`).
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub base: BaseUrl,
    pub path: &'static str,
    pub command: Command,
    pub method: HttpMethod,
}

impl Endpoint {
    pub fn for_operation(operation: Operation) -> Self {
        let (base, path, command) = match operation {
            Operation::GetBalance => (BaseUrl::Rest, "account", Command::Fixed("get-balance")),
            Operation::GetPhoneType => (BaseUrl::Api, "ni/standard", Command::Format),
            Operation::SendSms => (BaseUrl::Rest, "sms", Command::Format),
            Operation::SendTextToSpeech => (BaseUrl::Api, "tts", Command::Format),
        };
        Self {
            base,
            path,
            command,
            method: HttpMethod::Get,
        }
    }

    /// `<base><path>/<command>`, without query string.
    pub fn url(&self, bases: &BaseUrls, format: ResponseFormat) -> Result<Url, url::ParseError> {
        let command = match self.command {
            Command::Fixed(command) => command,
            Command::Format => format.as_str(),
        };
        Url::parse(bases.get(self.base))?.join(&format!("{}/{}", self.path, command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    rest: String,
    api: String,
}

impl BaseUrls {
    /// Store both base URLs, adding a trailing `/` where missing so paths are
    /// appended rather than replacing the last segment.
    pub fn new(rest: impl Into<String>, api: impl Into<String>) -> Self {
        Self {
            rest: with_trailing_slash(rest.into()),
            api: with_trailing_slash(api.into()),
        }
    }

    pub fn get(&self, base: BaseUrl) -> &str {
        match base {
            BaseUrl::Rest => &self.rest,
            BaseUrl::Api => &self.api,
        }
    }

    /// Check that both values parse as absolute URLs.
    pub fn validate(&self) -> Result<(), url::ParseError> {
        Url::parse(&self.rest)?;
        Url::parse(&self.api)?;
        Ok(())
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self::new(DEFAULT_REST_BASE_URL, DEFAULT_API_BASE_URL)
    }
}

fn with_trailing_slash(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    }
}
