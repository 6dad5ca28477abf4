pub mod client;
pub mod config;
pub mod error;

pub use client::{validate_field, Client, ClientSummary, Field, FieldRules, DEFAULT_DELIMITER};
pub use config::{OutputFormat, Settings};
pub use error::{ClientError, Result};
