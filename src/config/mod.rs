mod settings;

pub use settings::{OutputFormat, OutputSettings, RecordSettings, Settings};

use crate::client::Client;
use crate::error::{ClientError, Result};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stored clients keyed by their identifier in clients.toml
pub type ClientBook = BTreeMap<String, Client>;

/// Get the config directory path (XDG config dir, or ~/.clientbook)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "clientbook") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".clientbook"))
}

/// Load settings.toml (defaults if missing)
pub fn load_settings(config_dir: &Path) -> Result<Settings> {
    let path = config_dir.join("settings.toml");
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ClientError::ConfigParse { path, source: e })
}

/// Load clients.toml. Every entry is validated on the way in.
pub fn load_clients(config_dir: &Path) -> Result<ClientBook> {
    if !config_dir.exists() {
        return Err(ClientError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("clients.toml");
    if !path.exists() {
        return Err(ClientError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let clients: ClientBook =
        toml::from_str(&content).map_err(|e| ClientError::ConfigParse { path, source: e })?;
    debug!(count = clients.len(), "loaded clients");
    Ok(clients)
}

/// Save clients.toml
pub fn save_clients(config_dir: &Path, clients: &ClientBook) -> Result<()> {
    let path = config_dir.join("clients.toml");
    let content = toml::to_string_pretty(clients).map_err(|e| {
        ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(&path, content)?;
    debug!(path = %path.display(), count = clients.len(), "saved clients");
    Ok(())
}

/// Template content for settings.toml
pub const SETTINGS_TEMPLATE: &str = r#"[records]
delimiter = ","    # separator for delimited records

[output]
format = "text"    # text, json or delimited
"#;

/// Template content for clients.toml
pub const CLIENTS_TEMPLATE: &str = r#"# Stored clients. The table name (e.g., [smith]) is the client
# identifier used by the show and remove commands.
#
# Example:
#   clientbook show example-client

[example-client]
surname = "Smith"
name = "John"
patronymic = ""                 # optional
address = "12 Main Street"
phone = "+1-555-123-4567"       # +<1-3 digits>-<3>-<3>-<4>
"#;
