//! Response envelope decoding shared by the async and blocking clients.
//!
//! BlackBox wraps every payload as `{"data": ...}` and signals failure with
//! a non-200 status. ESA returns its payload at the top level. Decoding
//! failures of either kind are logged here and reported as `None`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, trace, warn};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the `data` member of a BlackBox envelope.
    ///
    /// Returns `None` for a non-200 status, an unparseable body, or a
    /// `data` member that is missing, null or empty.
    pub fn data<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        if !self.is_ok() {
            error!(endpoint, status = self.status, "Request failed with status code {}", self.status);
            return None;
        }

        let mut envelope = self.parse::<Value>(endpoint)?;
        let data = envelope.get_mut("data").map(Value::take)?;
        if !is_truthy(&data) {
            trace!(endpoint, "response has no data");
            return None;
        }

        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(endpoint, error = %e, "unexpected data shape");
                None
            }
        }
    }

    /// Decode a top-level JSON body without requiring a 200 status.
    ///
    /// A non-200 status is logged; the body is still inspected.
    pub fn json<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        if !self.is_ok() {
            warn!(endpoint, status = self.status, "unexpected status code");
        }
        self.parse(endpoint)
    }

    fn parse<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        match serde_json::from_slice(&self.body) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(endpoint, error = %e, "malformed response body");
                None
            }
        }
    }
}

/// Empty containers, empty strings, zero, false and null count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TokenData {
        token: Option<String>,
    }

    fn response(status: u16, body: Value) -> RawResponse {
        RawResponse::new(status, serde_json::to_vec(&body).unwrap())
    }

    #[test]
    fn data_extracts_payload() {
        let resp = response(200, json!({"data": {"token": "abc"}}));
        let data: TokenData = resp.data("v1/token").unwrap();
        assert_eq!(data.token.as_deref(), Some("abc"));
    }

    #[test]
    fn data_is_none_for_non_200() {
        let resp = response(401, json!({"data": {"token": "abc"}}));
        assert!(resp.data::<TokenData>("v1/token").is_none());
    }

    #[test]
    fn data_is_none_for_missing_or_empty_data() {
        assert!(response(200, json!({})).data::<Value>("x").is_none());
        assert!(response(200, json!({"data": null})).data::<Value>("x").is_none());
        assert!(response(200, json!({"data": {}})).data::<Value>("x").is_none());
    }

    #[test]
    fn data_is_none_for_malformed_body() {
        let resp = RawResponse::new(200, b"<html>oops</html>".to_vec());
        assert!(resp.data::<Value>("x").is_none());
    }

    #[test]
    fn json_ignores_status() {
        let resp = response(400, json!({"error": "invalid_grant"}));
        let body: Value = resp.json("oauth").unwrap();
        assert_eq!(body["error"], "invalid_grant");
    }

    #[test]
    fn truthiness_matches_empty_checks() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!([1])));
        assert!(is_truthy(&json!("x")));
    }
}
