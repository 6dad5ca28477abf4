use std::path::PathBuf;
use thiserror::Error;

use crate::client::Field;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0} cannot be empty")]
    EmptyField(Field),

    #[error("{0} must contain only letters")]
    NonLetterContent(Field),

    #[error("{field} is invalid. Expected format: {pattern}")]
    PatternMismatch { field: Field, pattern: String },

    #[error("Malformed record: expected {expected} fields, found {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing keys: {}", join_fields(.0))]
    MissingKeys(Vec<Field>),

    #[error("{field} cannot be written as a record delimited by '{delimiter}'")]
    UnencodableField { field: Field, delimiter: char },

    #[error("Config directory not found at {0}. Run 'clientbook init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Client '{0}' not found in clients.toml")]
    ClientNotFound(String),

    #[error("Client '{0}' already exists in clients.toml")]
    DuplicateClient(String),

    #[error("{count} invalid record(s) in {path}")]
    InvalidRecords { path: PathBuf, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ClientError>;
