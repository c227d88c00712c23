use reqwest::header::USER_AGENT;
use reqwest::Client;

/// ANEEL SIGEL wind turbine layer, every record and every field in one
/// response.
pub const SIGEL_QUERY_URL: &str = "https://sigel.aneel.gov.br/arcgis/rest/services/PORTAL/WFS/MapServer/0/query?where=1%3D1&text=&objectIds=&time=&timeRelation=esriTimeRelationOverlaps&geometry=&geometryType=esriGeometryEnvelope&inSR=&spatialRel=esriSpatialRelIntersects&distance=&units=esriSRUnit_Foot&relationParam=&outFields=*&returnGeometry=true&returnTrueCurves=false&maxAllowableOffset=&geometryPrecision=&outSR=&havingClause=&returnIdsOnly=false&returnCountOnly=false&orderByFields=&groupByFieldsForStatistics=&outStatistics=&returnZ=false&returnM=false&gdbVersion=&historicMoment=&returnDistinctValues=false&resultOffset=&resultRecordCount=&returnExtentOnly=false&sqlFormat=none&datumTransformation=&parameterValues=&rangeValues=&quantizationParameters=&featureEncoding=esriDefault&f=pjson";

const CLIENT_USER_AGENT: &str = concat!("aerogen-etl/", env!("CARGO_PKG_VERSION"));

/// Client for an ArcGIS feature `query` endpoint.
#[derive(Debug, Clone)]
pub struct SigelClient {
    client: Client,
    endpoint: String,
}

impl SigelClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues the query once. Transport errors, non-success statuses and
    /// undecodable bodies are logged and reported as `None`.
    pub async fn fetch(&self) -> Option<serde_json::Value> {
        match self.request().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!("An error occurred: {}", e);
                None
            }
        }
    }

    async fn request(&self) -> reqwest::Result<serde_json::Value> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        response.error_for_status()?.json().await
    }
}

impl Default for SigelClient {
    fn default() -> Self {
        Self::new(SIGEL_QUERY_URL)
    }
}
