//! Server configuration
//!
//! Layers, later wins: built-in defaults, `astro.toml` (or the file given
//! with `--config`), `ASTRO_*` environment variables, command-line flags.

use anyhow::{Context, Result};
use clap::Parser;
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_LOG_FILTER: &str = "astro_server=info,astro_core=info,tower_http=info";
const DEFAULT_CONFIG_FILE: &str = "astro";
const ENV_PREFIX: &str = "ASTRO";

/// Command-line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "astro-server", version, about = "Astro Studios website and content API")]
pub struct Cli {
    /// Configuration file (defaults to ./astro.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Directory holding the built frontend
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Start with an empty store
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    pub seed_sample_data: bool,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::load_with(cli, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(cli: &Cli, environment: Environment) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("seed_sample_data", true)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(file)
            .add_source(environment.try_parsing(true))
            .set_override_option("bind_address", cli.bind.clone())?
            .set_override_option(
                "static_dir",
                cli.static_dir
                    .as_ref()
                    .map(|dir| dir.to_string_lossy().into_owned()),
            )?
            .set_override_option("seed_sample_data", cli.no_seed.then_some(false))?
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load_with(&Cli::default(), env(&[])).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert!(config.seed_sample_data);
        assert!(config.static_dir.is_none());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.socket_addr().unwrap().port(), 5000);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ServerConfig::load_with(
            &Cli::default(),
            env(&[
                ("ASTRO_BIND_ADDRESS", "127.0.0.1:9000"),
                ("ASTRO_SEED_SAMPLE_DATA", "false"),
            ]),
        )
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli {
            bind: Some("127.0.0.1:7000".to_string()),
            static_dir: Some(PathBuf::from("dist/public")),
            no_seed: true,
            ..Cli::default()
        };
        let config =
            ServerConfig::load_with(&cli, env(&[("ASTRO_BIND_ADDRESS", "127.0.0.1:9000")])).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:7000");
        assert_eq!(config.static_dir, Some(PathBuf::from("dist/public")));
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("astro-config-{}.toml", std::process::id()));
        std::fs::write(&path, "bind_address = \"127.0.0.1:6000\"\nlog_filter = \"debug\"\n").unwrap();

        let cli = Cli {
            config: Some(path.clone()),
            ..Cli::default()
        };
        let config = ServerConfig::load_with(&cli, env(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:6000");
        assert_eq!(config.log_filter, "debug");
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/astro.toml")),
            ..Cli::default()
        };
        assert!(ServerConfig::load_with(&cli, env(&[])).is_err());
    }

    #[test]
    fn test_invalid_bind_address() {
        let cli = Cli {
            bind: Some("not-an-address".to_string()),
            ..Cli::default()
        };
        let config = ServerConfig::load_with(&cli, env(&[])).unwrap();
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["astro-server", "--bind", "127.0.0.1:1", "--no-seed"]);
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:1"));
        assert!(cli.no_seed);
        assert!(cli.config.is_none());
    }
}
