mod auth;
pub mod assignment;
pub mod course;
pub mod users;

pub use auth::{Credential, Token};
use log::debug;
use reqwest::{
    blocking::{Client as HttpClient, Response},
    header::{HeaderMap, HeaderValue, ACCEPT},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Number of records asked for in each listing request, unless overridden.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// A client, for using the Canvas REST API
pub struct Client {
    pub creds: Credential,
    per_page: u32,
    http: HttpClient,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("no {} was configured", .0)]
    MissingCredential(&'static str),

    #[error("request to {endpoint} failed with status {status}")]
    RemoteRequestFailed { status: u16, endpoint: String },

    #[error("http error: {}", .0)]
    Http(#[from] reqwest::Error),

    #[error("serde error: {}", .0)]
    Json(#[from] serde_json::Error),
}

impl Client {
    /// Create a client for the given credentials.
    ///
    /// Fails without touching the network if the token or base URL is empty.
    pub fn new(creds: Credential) -> Result<Self> {
        creds.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder()
            .user_agent(concat!("canvas-calendar/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Client {
            creds,
            per_page: DEFAULT_PER_PAGE,
            http,
        })
    }

    /// Set how many records each listing request asks for.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.creds.base_url(), path)
    }

    fn send(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response> {
        let resp = self
            .http
            .get(endpoint)
            .bearer_auth(self.creds.token.as_ref())
            .query(query)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            debug!("{} returned {}", endpoint, status);
            return Err(Error::RemoteRequestFailed {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(resp)
    }

    /// GET a single resource
    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let endpoint = self.endpoint(path);
        decode(self.send(&endpoint, &[])?)
    }

    /// GET one page of a listing endpoint
    pub(crate) fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let endpoint = self.endpoint(path);
        decode(self.send(&endpoint, &[("per_page", self.per_page.to_string())])?)
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if log::log_enabled!(log::Level::Debug) {
        let s = resp.text()?;
        debug!("response: {}", s);
        Ok(serde_json::from_str(&s)?)
    } else {
        Ok(resp.json()?)
    }
}

/// An opaque Canvas identifier.
///
/// Canvas sends IDs as numbers, but some instances (and some endpoints) stringify them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "IdRepr", into = "String")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

impl From<IdRepr> for Id {
    fn from(value: IdRepr) -> Self {
        match value {
            IdRepr::Number(n) => Id(n.to_string()),
            IdRepr::Text(s) => Id(s),
        }
    }
}

impl From<Id> for String {
    fn from(val: Id) -> Self {
        val.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
