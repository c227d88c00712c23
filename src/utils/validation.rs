use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn rejected(field_name: &str, value: &str, reason: impl Into<String>) -> Result<()> {
    Err(EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    })
}

/// Accepts absolute `http`/`https` URLs only.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return rejected(field_name, url_str, "URL cannot be empty");
    }

    match Url::parse(url_str).map(|url| url.scheme().to_string()) {
        Ok(scheme) if scheme == "http" || scheme == "https" => Ok(()),
        Ok(scheme) => rejected(field_name, url_str, format!("Unsupported URL scheme: {}", scheme)),
        Err(e) => rejected(field_name, url_str, format!("Invalid URL format: {}", e)),
    }
}

/// Output paths must name a file.
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        rejected(field_name, path, "Path cannot be empty")
    } else if path.contains('\0') {
        rejected(field_name, path, "Path contains null bytes")
    } else if path.ends_with('/') || path.ends_with('\\') {
        rejected(field_name, path, "Path must name a file, not a directory")
    } else {
        Ok(())
    }
}
