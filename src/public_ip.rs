use std::net::IpAddr;

use reqwest::Client;

use crate::error::Error;
use crate::http::expect_ok;

pub const ICANHAZIP_URL: &str = "https://icanhazip.com/";

const OPERATION: &str = "get public ip";

pub struct PublicIpResolver {
    client: Client,
    url: String,
}

impl PublicIpResolver {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, ICANHAZIP_URL)
    }

    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn current(&self) -> Result<String, Error> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(Error::transport(OPERATION))?;

        let body = expect_ok(OPERATION, response)
            .await?
            .text()
            .await
            .map_err(Error::decode(OPERATION))?;

        parse_ipv4(&body)
    }
}

fn parse_ipv4(body: &str) -> Result<String, Error> {
    let text = body.trim();
    let addr = text
        .parse::<IpAddr>()
        .map_err(|_| Error::InvalidAddress(text.to_string()))?;

    match addr {
        IpAddr::V4(v4) => Ok(v4.to_string()),
        // ::ffff:a.b.c.d still names an ipv4 host
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => Ok(v4.to_string()),
            None => Err(Error::NotIpv4(addr)),
        },
    }
}
