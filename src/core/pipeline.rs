use crate::adapters::SigelClient;
use crate::core::export::to_csv_bytes;
use crate::core::transform::build_geo_table;
use crate::core::{ConfigProvider, GeoTable, Pipeline, Storage};
use crate::utils::error::Result;

/// Fetches the wind turbine layer, builds the geo table and stores it as
/// CSV at the configured output path.
pub struct AerogeneratorPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: SigelClient,
}

impl<S: Storage, C: ConfigProvider> AerogeneratorPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = SigelClient::new(config.api_endpoint());
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AerogeneratorPipeline<S, C> {
    async fn extract(&self) -> Option<serde_json::Value> {
        self.client.fetch().await
    }

    async fn transform(&self, data: Option<serde_json::Value>) -> Result<GeoTable> {
        build_geo_table(data.as_ref())
    }

    async fn load(&self, table: GeoTable) -> Result<String> {
        let output_path = self.config.output_path();
        let data = to_csv_bytes(&table)?;

        tracing::debug!("Writing {} rows ({} bytes) to storage", table.len(), data.len());
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        output_path: String,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                output_path: "output/aerogeradores.csv".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn service_body() -> serde_json::Value {
        serde_json::json!({
            "spatialReference": {"wkid": 4674},
            "features": [
                {
                    "attributes": {"NOME_EOL": "EOL Alpha", "UF": "CE", "DATA_ATUALIZACAO": 1000},
                    "geometry": {"x": -38.5, "y": -3.75}
                },
                {
                    "attributes": {"NOME_EOL": "EOL Beta", "UF": "RN", "DATA_ATUALIZACAO": 0},
                    "geometry": {"x": -36.0, "y": -5.5}
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_extract_returns_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/query");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(service_body());
        });

        let pipeline = AerogeneratorPipeline::new(MockStorage::new(), MockConfig::new(server.url("/query")));
        let body = pipeline.extract().await;

        api_mock.assert();
        assert_eq!(body, Some(service_body()));
    }

    #[tokio::test]
    async fn test_extract_failure_then_transform_reports_no_data() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/query");
            then.status(503);
        });

        let pipeline = AerogeneratorPipeline::new(MockStorage::new(), MockConfig::new(server.url("/query")));
        let body = pipeline.extract().await;

        api_mock.assert();
        assert!(body.is_none());
        assert!(matches!(pipeline.transform(body).await, Err(EtlError::NoData)));
    }

    #[tokio::test]
    async fn test_transform_and_load() {
        let storage = MockStorage::new();
        let pipeline = AerogeneratorPipeline::new(storage.clone(), MockConfig::new("http://test.com".to_string()));

        let table = pipeline.transform(Some(service_body())).await.unwrap();
        assert_eq!(table.len(), 2);

        let output_path = pipeline.load(table).await.unwrap();
        assert_eq!(output_path, "output/aerogeradores.csv");

        let csv_data = storage.get_file("output/aerogeradores.csv").await.unwrap();
        let text = String::from_utf8(csv_data).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NOME_EOL,UF,DATA_ATUALIZACAO,latitude,longitude");
        assert_eq!(lines[1], "EOL Alpha,CE,1970-01-01 00:00:01,-3.75,-38.5");
        assert_eq!(lines[2], "EOL Beta,RN,1970-01-01 00:00:00,-5.5,-36.0");
    }
}
