//! HTTP verbs understood by the client.

use serde::{Deserialize, Serialize};

/// Request method.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read
    #[default]
    Get,
    /// Create
    Post,
    /// Replace
    Put,
    /// Remove
    Delete,
}

impl Method {
    /// Whether the method mutates content on the server.
    pub fn is_write(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}
