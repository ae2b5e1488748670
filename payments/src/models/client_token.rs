use base64::{Engine, prelude::BASE64_STANDARD};
use derive_more::{Display, Error};
use serde::Deserialize;
use std::fmt;

/// Client token issued by Braintree, handed as-is to client side SDKs.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientToken(String);

/// Fields of the base64 JSON document a client token carries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenPayload {
    #[serde(default)]
    pub version: Option<u32>,
    pub authorization_fingerprint: String,
    #[serde(default)]
    pub config_url: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub merchant_id: Option<String>,
}

#[derive(Debug, Display, Error)]
pub enum TokenDecodeError {
    #[display("client token is not valid base64: {_0}")]
    InvalidBase64(base64::DecodeError),
    #[display("client token payload is not valid json: {_0}")]
    InvalidPayload(serde_json::Error),
}

impl ClientToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Decodes the token payload, surrounding whitespace is ignored
    pub fn decode(&self) -> Result<ClientTokenPayload, TokenDecodeError> {
        let bytes = BASE64_STANDARD
            .decode(self.0.trim().as_bytes())
            .map_err(TokenDecodeError::InvalidBase64)?;

        serde_json::from_slice(&bytes).map_err(TokenDecodeError::InvalidPayload)
    }
}

impl fmt::Display for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientToken({} chars)", self.0.len())
    }
}
