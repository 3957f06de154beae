//! CLI argument definitions for the Talento binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use talento_core::types::Permission;
use uuid::Uuid;

/// Talento — run chat actions against the HR document corpus.
#[derive(Parser, Debug)]
#[command(name = "talento", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// JSON document corpus, overriding `documents.corpus_path`.
    #[arg(long = "corpus", global = true)]
    pub corpus: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the actions a role set may run.
    Actions {
        /// Comma-separated roles, e.g. `empleado` or `hr,jefe`.
        #[arg(short = 'r', long, value_delimiter = ',', required = true)]
        roles: Vec<Permission>,

        /// Emit the catalogue as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Dispatch one action and print its result as JSON.
    Run {
        /// Action name, e.g. `buscar_en_documentos`.
        action: String,

        /// Comma-separated caller roles.
        #[arg(short = 'r', long, value_delimiter = ',', required = true)]
        roles: Vec<Permission>,

        /// Company the caller belongs to.
        #[arg(long)]
        company: Option<Uuid>,

        /// Caller user ID, recorded in logs.
        #[arg(long)]
        user: Option<Uuid>,

        /// Action parameter as `name=value`. Repeatable.
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TALENTO_CONFIG env var > ~/.talento/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TALENTO_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the corpus path: --corpus flag > config value.
    pub fn resolve_corpus(&self, config_corpus: Option<&str>) -> Option<PathBuf> {
        self.corpus
            .clone()
            .or_else(|| config_corpus.map(expand_home))
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{}`", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty parameter name in `{}`", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let home = std::env::var("USERPROFILE");
    #[cfg(not(target_os = "windows"))]
    let home = std::env::var("HOME");
    home.map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

fn default_config_path() -> PathBuf {
    home_dir().join(".talento").join("config.toml")
}
