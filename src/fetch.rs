//! HTTP plumbing shared by every LIMS API client

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result, UNKNOWN_ERROR};

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Attach the session token, if there is one
    pub fn token_auth(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header("Authorization", &format!("Token {}", token)),
            None => self,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder> {
        let url = Url::parse(&self.url)?;

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and decode the response envelope into `T`
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let req = self.build()?;
        debug!("{} {}", self.method, self.url);

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("{} {} -> {}", self.method, self.url, status);

        decode_envelope(status.as_u16(), status.is_success(), &text)
    }
}

/// Decode a gateway response body.
///
/// Objects carrying `"ok": false` are failures even on a 2xx status. An empty
/// success body decodes as an empty object.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    success: bool,
    text: &str,
) -> Result<T> {
    let value: Value = if text.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        match serde_json::from_str(text) {
            Ok(value) => value,
            Err(_) if !success => return Err(Error::api(status, UNKNOWN_ERROR)),
            Err(e) => return Err(e.into()),
        }
    };

    let rejected = value.get("ok").and_then(Value::as_bool) == Some(false);
    if !success || rejected {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_ERROR);
        return Err(Error::api(status, message));
    }

    Ok(serde_json::from_value(value)?)
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }
}

/// Connection details shared by the per-area API clients
#[derive(Debug, Clone)]
pub struct Gateway {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl Gateway {
    pub(crate) fn new(base_url: &str, token: Option<String>, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a GET request against `path`
    pub fn get(&self, path: &str) -> FetchBuilder<'_> {
        Fetch::get(&self.client, &self.endpoint(path)).token_auth(self.token.as_deref())
    }

    /// Start a POST request against `path`
    pub fn post(&self, path: &str) -> FetchBuilder<'_> {
        Fetch::post(&self.client, &self.endpoint(path)).token_auth(self.token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Receipt {
        request_id: String,
    }

    #[derive(Debug, Deserialize)]
    struct Ack {}

    #[test]
    fn ok_envelope_decodes_payload() {
        let receipt: Receipt =
            decode_envelope(200, true, r#"{"ok": true, "request_id": "REQ-0007"}"#).unwrap();
        assert_eq!(receipt.request_id, "REQ-0007");
    }

    #[test]
    fn ok_false_is_an_error_even_on_200() {
        let err = decode_envelope::<Receipt>(200, true, r#"{"ok": false, "error": "No stock"}"#)
            .unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "No stock");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_failure_uses_fallback_message() {
        let err = decode_envelope::<Receipt>(500, false, "<html>boom</html>").unwrap_err();
        assert_eq!(err.user_message("x"), UNKNOWN_ERROR);
    }

    #[test]
    fn empty_success_body_is_an_empty_object() {
        assert!(decode_envelope::<Ack>(201, true, "").is_ok());
    }

    #[test]
    fn bare_arrays_pass_through() {
        let values: Vec<u32> = decode_envelope(200, true, "[1, 2, 3]").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
