use serde_json::{Map, Value};
use url::Url;

use crate::domain::HttpMethod;

/// Fully-authenticated request for a single provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Encode `params` for `method`.
    ///
    /// GET appends the parameters to the query string in insertion order. POST
    /// leaves the URL untouched and sends the same parameters as a JSON object.
    pub fn new(method: HttpMethod, url: Url, params: Vec<(String, String)>) -> Self {
        match method {
            HttpMethod::Get => Self {
                method,
                url: encode_query(url, &params),
                body: None,
            },
            HttpMethod::Post => Self {
                method,
                url,
                body: Some(encode_json_body(params)),
            },
        }
    }

    /// URL with credentials stripped from the query, for logging.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }
}

fn encode_query(mut url: Url, params: &[(String, String)]) -> Url {
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    url
}

fn encode_json_body(params: Vec<(String, String)>) -> Value {
    let object = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect::<Map<String, Value>>();
    Value::Object(object)
}
