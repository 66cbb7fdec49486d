//! Credentials used to talk to a Canvas instance.
//!
//! Obtaining a token (OAuth, or generating one from the Canvas settings page) happens elsewhere;
//! this client only ever presents it as a bearer token.
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Information used to make authenticated requests
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credential {
    pub base_url: String,
    pub token: Token,
}

impl Credential {
    pub fn new(base_url: impl Into<String>, token: impl Into<Token>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// The instance URL, without any trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.token.as_ref().trim().is_empty() {
            return Err(Error::MissingCredential("access token"));
        }
        if self.base_url().is_empty() {
            return Err(Error::MissingCredential("Canvas URL"));
        }

        Ok(())
    }
}

/// An access token, wrapped so we don't print it by accident
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Token(String);
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token (******)")
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl From<Token> for String {
    fn from(val: Token) -> Self {
        val.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
