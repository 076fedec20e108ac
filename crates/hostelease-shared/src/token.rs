//! Credentials handed out by the token endpoint
//!
//! Values are kept in [`SecretString`]s so they never show up in `Debug`
//! output and therefore never end up in traces

use secrecy::{ExposeSecret as _, SecretString};

/// Short lived credential sent as the bearer token on every request
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(transparent)]
pub struct AccessToken(SecretString);

/// Long lived credential that is stored but not used for requests
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(SecretString);

/// Body of a successful response from the token endpoint
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

impl AccessToken {
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value for the `Authorization` header
    pub fn bearer_header_value(&self) -> String {
        format!("Bearer {}", self.expose_secret())
    }
}

impl RefreshToken {
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<String> for RefreshToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for RefreshToken {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}
