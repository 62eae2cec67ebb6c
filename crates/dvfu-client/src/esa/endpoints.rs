//! ESA endpoint paths and wire types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dvfu_core::{BearerToken, RawResponse};

use super::EsaToken;

/// POST: OAuth password grant.
pub(crate) const TOKEN_CREATE: &str = "oauth/token/create/";

/// Request body for the password grant.
#[derive(Debug, Serialize)]
pub(crate) struct TokenCreateRequest<'a> {
    pub grant_type: &'static str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> TokenCreateRequest<'a> {
    pub fn password_grant(username: &'a str, password: &'a str) -> Self {
        Self {
            grant_type: "password",
            username,
            password,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenCreateResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Read the token from a password grant response. The status code is not
/// required to be 200; only the body decides.
pub(crate) fn token_from(response: &RawResponse) -> Option<EsaToken> {
    let body = response.json::<TokenCreateResponse>(TOKEN_CREATE)?;
    Some(EsaToken {
        access_token: BearerToken::new(body.access_token?),
        token_type: body.token_type,
        expires_in: body.expires_in.map(Duration::from_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_grant_body() {
        let body = serde_json::to_value(TokenCreateRequest::password_grant("u", "p")).unwrap();
        assert_eq!(
            body,
            json!({"grant_type": "password", "username": "u", "password": "p"})
        );
    }

    #[test]
    fn token_with_metadata() {
        let response = RawResponse::new(
            200,
            br#"{"access_token":"xyz","token_type":"Bearer","expires_in":3600}"#.to_vec(),
        );
        let token = token_from(&response).unwrap();
        assert_eq!(token.access_token.as_str(), "xyz");
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
        assert_eq!(token.expires_in, Some(Duration::from_secs(3600)));
    }

    #[test]
    fn error_body_has_no_token() {
        let response = RawResponse::new(400, br#"{"error":"invalid_grant"}"#.to_vec());
        assert!(token_from(&response).is_none());
    }

    #[test]
    fn non_json_body_has_no_token() {
        let response = RawResponse::new(502, b"Bad Gateway".to_vec());
        assert!(token_from(&response).is_none());
    }
}
