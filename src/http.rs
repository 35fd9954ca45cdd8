use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::error::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_client() -> Result<Client, Error> {
    build_client_with_timeout(REQUEST_TIMEOUT)
}

pub fn build_client_with_timeout(timeout: Duration) -> Result<Client, Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(Error::transport("build http client"))
}

pub async fn expect_ok(operation: &'static str, response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::status(operation, status, &body))
}

// a local address nothing listens on
#[cfg(test)]
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
