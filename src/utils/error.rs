use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No data returned by the feature service")]
    NoData,

    #[error("Missing or malformed field: {field}")]
    MissingField { field: String },

    #[error("Invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("Feature service error {code}: {message}")]
    ServiceError { code: i64, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        EtlError::MissingField {
            field: field.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::CsvError(_) => "Could not write the CSV output".to_string(),
            EtlError::IoError(e) => format!("File system error: {}", e),
            EtlError::NoData => "The feature service returned no data".to_string(),
            EtlError::MissingField { field } => {
                format!("The service response is missing '{}'", field)
            }
            EtlError::InvalidTimestamp { field, value } => {
                format!("'{}' holds a value that is not a timestamp: {}", field, value)
            }
            EtlError::ServiceError { code, message } => {
                format!("The feature service rejected the query ({}): {}", code, message)
            }
            EtlError::ConfigError { message } => format!("Configuration problem: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the output path is writable"
            }
            EtlError::NoData => "Check network access to the endpoint and look at the logged error",
            EtlError::MissingField { .. }
            | EtlError::InvalidTimestamp { .. }
            | EtlError::ServiceError { .. } => {
                "Check that the endpoint is an ArcGIS feature query returning JSON"
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => 1,
            EtlError::NoData | EtlError::ServiceError { .. } => 2,
            EtlError::MissingField { .. } | EtlError::InvalidTimestamp { .. } => 3,
            EtlError::CsvError(_) | EtlError::IoError(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
