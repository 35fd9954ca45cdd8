use std::net::IpAddr;

use reqwest::StatusCode;
use thiserror::Error;

const MAX_BODY_EXCERPT: usize = 256;

// any of these ends the process
#[derive(Error, Debug)]
pub enum Error {
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: unexpected status {status}: {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{operation}: malformed response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("public ip lookup returned an unparsable address: {0:?}")]
    InvalidAddress(String),

    #[error("public ip {0} is not an ipv4 address")]
    NotIpv4(IpAddr),
}

impl Error {
    pub fn transport(operation: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Error::Transport { operation, source }
    }

    pub fn decode(operation: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Error::Decode { operation, source }
    }

    pub fn status(operation: &'static str, status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let body = match body.char_indices().nth(MAX_BODY_EXCERPT) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Error::Status {
            operation,
            status,
            body,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}
