use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::http::expect_ok;

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

pub const RECORD_TTL: u32 = 300;

#[derive(Serialize, Debug, PartialEq)]
struct UpdateRequest<'a> {
    content: &'a str,
    name: &'a str,
    r#type: &'static str,
    ttl: u32,
}

#[derive(Deserialize)]
struct RecordQueryResult {
    result: DnsRecord,
}

#[derive(Deserialize)]
struct DnsRecord {
    content: String,
}

pub struct CloudflareClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, CLOUDFLARE_API_BASE)
    }

    pub fn with_base_url(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn record_url(&self, zone_id: &str, record_id: &str) -> String {
        format!("{}/zones/{}/dns_records/{}", self.base_url, zone_id, record_id)
    }

    pub async fn get_record_content(&self, zone_id: &str, record_id: &str) -> Result<String, Error> {
        const OPERATION: &str = "get dns record";

        let response = self
            .client
            .get(self.record_url(zone_id, record_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(Error::transport(OPERATION))?;

        let query: RecordQueryResult = expect_ok(OPERATION, response)
            .await?
            .json()
            .await
            .map_err(Error::decode(OPERATION))?;

        Ok(query.result.content)
    }

    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record_name: &str,
        public_ip: &str,
    ) -> Result<(), Error> {
        const OPERATION: &str = "update dns record";

        let request = UpdateRequest {
            content: public_ip,
            name: record_name,
            r#type: "A",
            ttl: RECORD_TTL,
        };
        debug!("PUT {} {:?}", self.record_url(zone_id, record_id), request);

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .put(self.record_url(zone_id, record_id))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Error::transport(OPERATION))?;

        expect_ok(OPERATION, response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod unit {
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::{build_client, closed_port_uri};

    const RECORD_PATH: &str = "/zones/zone-1/dns_records/record-1";

    fn client_for(server: &MockServer) -> CloudflareClient {
        CloudflareClient::with_base_url(build_client().unwrap(), "token", server.uri())
    }

    #[test]
    fn test_update_request_wire_format() {
        let request = UpdateRequest {
            content: "198.51.100.2",
            name: "home.example.com",
            r#type: "A",
            ttl: RECORD_TTL,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"content": "198.51.100.2", "name": "home.example.com", "type": "A", "ttl": 300})
        );
    }

    #[tokio::test]
    async fn test_get_record_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RECORD_PATH))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "record-1", "type": "A", "content": "198.51.100.1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cf = client_for(&server);
        assert_eq!(
            cf.get_record_content("zone-1", "record-1").await.unwrap(),
            "198.51.100.1"
        );
    }

    #[tokio::test]
    async fn test_get_record_content_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RECORD_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "errors": [{"code": 81044, "message": "Record does not exist."}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cf = client_for(&server);
        match cf.get_record_content("zone-1", "record-1").await {
            Err(Error::Status { status, body, .. }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.contains("Record does not exist."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_record_content_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RECORD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\": null}"))
            .mount(&server)
            .await;

        let cf = client_for(&server);
        assert!(matches!(
            cf.get_record_content("zone-1", "record-1").await,
            Err(Error::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_record() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(RECORD_PATH))
            .and(header("authorization", "Bearer token"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "content": "198.51.100.2",
                "name": "home.example.com",
                "type": "A",
                "ttl": 300
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let cf = client_for(&server);
        cf.update_record("zone-1", "record-1", "home.example.com", "198.51.100.2")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_record_bad_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(RECORD_PATH))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let cf = client_for(&server);
        assert!(matches!(
            cf.update_record("zone-1", "record-1", "home.example.com", "198.51.100.2")
                .await,
            Err(Error::Status { operation: "update dns record", .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_transport_error() {
        let uri = closed_port_uri();
        let cf = CloudflareClient::with_base_url(build_client().unwrap(), "token", uri);

        assert!(matches!(
            cf.get_record_content("zone-1", "record-1").await,
            Err(Error::Transport { operation: "get dns record", .. })
        ));
        assert!(matches!(
            cf.update_record("zone-1", "record-1", "home.example.com", "198.51.100.2")
                .await,
            Err(Error::Transport { operation: "update dns record", .. })
        ));
    }
}
