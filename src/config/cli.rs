use crate::adapters::SIGEL_QUERY_URL;
use crate::config::toml_config::{TomlConfig, DEFAULT_OUTPUT_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "aerogen-etl")]
#[command(about = "Export ANEEL SIGEL wind turbine locations to CSV")]
pub struct CliConfig {
    /// ArcGIS feature query URL [default: ANEEL SIGEL wind turbine layer]
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// CSV file to write [default: ./output/aerogeradores.csv]
    #[arg(long)]
    pub output_path: Option<String>,

    /// TOML configuration file; explicit flags take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Fills settings not given on the command line from `file`.
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        if self.api_endpoint.is_none() {
            self.api_endpoint = file.source.endpoint;
        }
        if self.output_path.is_none() {
            self.output_path = file.load.output_path;
        }
        self
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or(SIGEL_QUERY_URL)
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", self.api_endpoint())?;
        validation::validate_path("output_path", self.output_path())
    }
}
