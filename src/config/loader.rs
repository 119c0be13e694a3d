use crate::config::ConfigDescriptor;
use crate::error::{ConfigError, Result};
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable naming the descriptor file for the process
pub const CONFIG_PATH_KEY: &str = "CHAIN_TARGETS_CONFIG";

static GLOBAL_DESCRIPTOR: OnceCell<ConfigDescriptor> = OnceCell::new();

/// Source formats a descriptor file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Format> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            _ => Err(ConfigError::Config(format!(
                "Unsupported descriptor file: {}. Use a .toml or .json file",
                path.display()
            ))),
        }
    }
}

pub fn from_toml_str(source: &str) -> Result<ConfigDescriptor> {
    let descriptor: ConfigDescriptor = toml::from_str(source)?;
    descriptor.validate()?;
    Ok(descriptor)
}

pub fn from_json_str(source: &str) -> Result<ConfigDescriptor> {
    let descriptor: ConfigDescriptor = serde_json::from_str(source)?;
    descriptor.validate()?;
    Ok(descriptor)
}

pub fn from_str(source: &str, format: Format) -> Result<ConfigDescriptor> {
    match format {
        Format::Toml => from_toml_str(source),
        Format::Json => from_json_str(source),
    }
}

/// Read and validate a descriptor file, picking the format from its extension
pub fn load<P: AsRef<Path>>(path: P) -> Result<ConfigDescriptor> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    debug!("Reading {:?} descriptor from {}", format, path.display());
    let source = fs::read_to_string(path)?;
    let descriptor = from_str(&source, format)?;
    info!(
        "Loaded {} network target(s) from {}",
        descriptor.len(),
        path.display()
    );
    Ok(descriptor)
}

/// Load from `CHAIN_TARGETS_CONFIG` when set, otherwise the built-in descriptor
pub fn load_from_env() -> Result<ConfigDescriptor> {
    match env::var(CONFIG_PATH_KEY) {
        Ok(path) => load(path),
        Err(env::VarError::NotPresent) => {
            debug!("{CONFIG_PATH_KEY} not set, using built-in descriptor");
            Ok(ConfigDescriptor::default())
        }
        Err(err) => Err(ConfigError::Config(format!("{CONFIG_PATH_KEY}: {err}"))),
    }
}

/// Process-wide descriptor, loaded on first use and read-only afterwards.
///
/// A failed load is returned and not cached, so a later call retries it.
pub fn global() -> Result<&'static ConfigDescriptor> {
    GLOBAL_DESCRIPTOR.get_or_try_init(load_from_env)
}
