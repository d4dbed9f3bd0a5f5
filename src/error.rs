use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid release tag: {0}")]
    InvalidReleaseTag(String),

    #[error("Packaging failed: {0}")]
    Packaging(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type Result<T> = std::result::Result<T, PkgerError>;
