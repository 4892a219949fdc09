use crate::config::CatalogSettings;
use crate::domain::model::{Dataset, Pin, Record};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Socrata-style open-data catalog reached over HTTP.
pub struct CatalogClient {
    settings: CatalogSettings,
    client: Client,
}

impl CatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { settings, client })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_records(&self, dataset: Dataset, pin: &Pin) -> Result<Vec<Record>> {
        let url = self.settings.resource_url(dataset);
        let match_param = self.settings.dataset(dataset).match_param.as_str();
        let limit = self.settings.record_limit.to_string();
        let order = self.settings.order_clause();

        tracing::debug!("Querying {} records for pin {} at {}", dataset, pin, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                (match_param, pin.as_str()),
                ("$order", order.as_str()),
                ("$limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Catalog response status for {} pin {}: {}", dataset, pin, status);

        if !status.is_success() {
            return Err(ProxyError::UpstreamStatusError {
                status: status.as_u16(),
            });
        }

        let records: Vec<Record> = response.json().await?;
        tracing::debug!("Received {} {} records for pin {}", records.len(), dataset, pin);

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> CatalogClient {
        let settings = CatalogSettings {
            base_url: server.base_url(),
            ..CatalogSettings::default()
        };
        CatalogClient::new(settings).unwrap()
    }

    #[tokio::test]
    async fn test_assessment_query_shape() {
        let server = MockServer::start();
        let mock_data = serde_json::json!([
            {"pin": "17042140050000", "year": "2023", "mailed_tot": "51000"},
            {"pin": "17042140050000", "year": "2022", "mailed_tot": "48000"}
        ]);

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/resource/uzyt-m557.json")
                .query_param("pin", "17042140050000")
                .query_param("$order", "year DESC")
                .query_param("$limit", "10");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_data);
        });

        let client = client_for(&server);
        let records = client
            .fetch_records(Dataset::Assessment, &Pin::from("17042140050000"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data.get("year").unwrap(), "2023");
        assert_eq!(records[1].data.get("year").unwrap(), "2022");
    }

    #[tokio::test]
    async fn test_commercial_uses_pins_parameter() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/resource/csik-bsws.json")
                .query_param("pins", "17042140050000")
                .query_param("$limit", "10");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"pins": "17042140050000", "year": "2024"}]));
        });

        let client = client_for(&server);
        let records = client
            .fetch_records(Dataset::Commercial, &Pin::from("17042140050000"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/resource/uzyt-m557.json");
            then.status(503);
        });

        let client = client_for(&server);
        let err = client
            .fetch_records(Dataset::Assessment, &Pin::from("1"))
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ProxyError::UpstreamStatusError { status: 503 }));
    }

    #[tokio::test]
    async fn test_non_array_body_is_failure() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/resource/uzyt-m557.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": true, "message": "query failed"}));
        });

        let client = client_for(&server);
        let result = client
            .fetch_records(Dataset::Assessment, &Pin::from("1"))
            .await;

        assert!(matches!(result, Err(ProxyError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_failure() {
        let settings = CatalogSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            ..CatalogSettings::default()
        };
        let client = CatalogClient::new(settings).unwrap();

        let result = client
            .fetch_records(Dataset::Commercial, &Pin::from("1"))
            .await;

        assert!(matches!(result, Err(ProxyError::ApiError(_))));
    }
}
