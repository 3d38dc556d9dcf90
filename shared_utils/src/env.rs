use std::env::VarError;

use thiserror::Error;

/// A required environment variable could not be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvVarError {
    #[error("Missing environment variable: {0}")]
    Missing(String),

    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

/// Reads a required environment variable.
pub fn get_env_var(name: &str) -> Result<String, EnvVarError> {
    std::env::var(name).map_err(|e| match e {
        VarError::NotPresent => EnvVarError::Missing(name.to_string()),
        VarError::NotUnicode(_) => EnvVarError::NotUnicode(name.to_string()),
    })
}

/// Reads an optional environment variable.
///
/// Unset, non-unicode and blank (whitespace only) values all yield `None`,
/// so callers can treat "exported but empty" the same as "not exported".
pub fn get_optional_env_var(name: &str) -> Option<String> {
    get_env_var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
