use crate::domain::model::GeoTable;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
}

/// Extract yields `None` when the source could not be read; the failure has
/// already been logged and `transform` decides whether that is fatal.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Option<serde_json::Value>;
    async fn transform(&self, data: Option<serde_json::Value>) -> Result<GeoTable>;
    async fn load(&self, table: GeoTable) -> Result<String>;
}
