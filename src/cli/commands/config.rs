//! Configuration command.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};

/// Show the effective configuration, optionally writing a default file first.
pub fn cmd_config(config: &Config, explicit_path: Option<&Path>, init: bool) -> anyhow::Result<()> {
    let path = resolve_path(explicit_path)?;

    if init {
        if path.exists() {
            println!("Config already exists at {}, leaving it alone", path.display());
        } else {
            let written = match explicit_path {
                Some(path) => {
                    config::save_to(&Config::default(), path)?;
                    path.to_path_buf()
                }
                None => config::save(&Config::default())?,
            };
            println!("Wrote default config to {}", written.display());
        }
        println!();
    }

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("(not present, showing defaults)");
    }
    println!();
    print!("{}", render(config)?);
    Ok(())
}

fn resolve_path(explicit_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config::config_path().ok_or(config::ConfigError::NoConfigDir)?),
    }
}

/// The config as TOML, with the API key masked.
fn render(config: &Config) -> anyhow::Result<String> {
    let mut shown = config.clone();
    if shown.lookup.api_key.is_some() {
        shown.lookup.api_key = Some("********".to_string());
    }
    Ok(toml::to_string_pretty(&shown)?)
}
