use crate::adapters::SIGEL_QUERY_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output/aerogeradores.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are kept
    /// verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or(SIGEL_QUERY_URL)
    }

    fn output_path(&self) -> &str {
        self.load.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", self.api_endpoint())?;
        validation::validate_path("load.output_path", self.output_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[source]
endpoint = "https://example.com/arcgis/rest/services/X/MapServer/0/query?where=1%3D1&f=json"

[load]
output_path = "./data/turbines.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.api_endpoint(),
            "https://example.com/arcgis/rest/services/X/MapServer/0/query?where=1%3D1&f=json"
        );
        assert_eq!(config.output_path(), "./data/turbines.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_endpoint(), SIGEL_QUERY_URL);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AEROGEN_TEST_ENDPOINT", "https://test.api.com/query");

        let toml_content = r#"
[source]
endpoint = "${AEROGEN_TEST_ENDPOINT}"

[load]
output_path = "${AEROGEN_TEST_UNSET_VARIABLE}/out.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_endpoint(), "https://test.api.com/query");
        assert_eq!(config.output_path(), "${AEROGEN_TEST_UNSET_VARIABLE}/out.csv");

        std::env::remove_var("AEROGEN_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
endpoint = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[source\nendpoint = ");
        assert!(matches!(result, Err(EtlError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[load]\noutput_path = \"out/file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "out/file.csv");
    }

    #[test]
    fn test_missing_file() {
        let result = TomlConfig::from_file("/nonexistent/aerogen.toml");
        assert!(matches!(result, Err(EtlError::ConfigError { .. })));
    }
}
