use serde::{Deserialize, Serialize};

use crate::client::{Client, DEFAULT_DELIMITER};
use crate::error::Result;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub records: RecordSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RecordSettings {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How a client is printed by the CLI
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled multi-line block
    #[default]
    Text,
    /// One JSON object per client
    Json,
    /// One delimited record per client
    Delimited,
}

impl OutputFormat {
    pub fn render(self, client: &Client, delimiter: char) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(client.to_string()),
            OutputFormat::Json => Ok(client.to_json()),
            OutputFormat::Delimited => client.to_delimited(delimiter),
        }
    }
}
