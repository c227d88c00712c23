use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load once, returning the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");

        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await;

        tracing::info!("Transforming data...");
        let table = self.pipeline.transform(raw_data).await?;
        tracing::info!("Transformed {} features", table.len());

        if let Some(crs) = table.crs() {
            tracing::info!("Coordinate reference system: {}", crs);
        }
        if let Some(bounds) = table.bounds() {
            tracing::info!(
                "Extent: x [{:.4}, {:.4}], y [{:.4}, {:.4}]",
                bounds.min().x,
                bounds.max().x,
                bounds.min().y,
                bounds.max().y
            );
        }

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(table).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
