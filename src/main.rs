use aerogen_etl::utils::{logger, validation::Validate};
use aerogen_etl::{AerogeneratorPipeline, CliConfig, EtlEngine, LocalStorage, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::info!("Starting aerogen-etl");

    if let Some(path) = config.config.clone() {
        tracing::info!("Loading configuration from: {}", path);
        match TomlConfig::from_file(&path).and_then(|file| file.validate().map(|_| file)) {
            Ok(file) => config = config.merge_file(file),
            Err(e) => {
                tracing::error!("Failed to load config file '{}': {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        }
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let pipeline = AerogeneratorPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("ETL process completed successfully");
            println!("✅ Wind turbine locations exported to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("ETL process failed: {}", e);
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
