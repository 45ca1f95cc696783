use crate::core::defaults::Defaults;
use crate::selection::keys::KeyBindings;
use crate::selection::render::RowLayout;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PICKER: &str = "rofi";
pub const DEFAULT_PROMPT: &str = "Select Credential";
const DEFAULT_FILE_NAME: &str = ".ctfcred.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} is not valid TOML: {reason}")]
    InvalidFile { path: PathBuf, reason: String },
    #[error("environment variable {0} holds an invalid value")]
    InvalidEnv(&'static str),
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub credential_file: Option<String>,
    pub user_width: Option<usize>,
    pub url_width: Option<usize>,
    pub picker: Option<String>,
    pub prompt: Option<String>,
    pub backups: Option<usize>,
    pub default_url: Option<String>,
    pub default_domain: Option<String>,
    pub keys: Option<KeyBindings>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credential_file: PathBuf,
    pub layout: RowLayout,
    pub picker: String,
    pub prompt: String,
    pub backups: usize,
    /// Overrides applied ahead of the defaults stored in the credential file.
    pub defaults: Defaults,
    pub keys: KeyBindings,
}

impl Config {
    /// Resolve settings with precedence: CLI > environment > config file > built-in defaults.
    pub fn create(path: Option<PathBuf>, prompt: Option<String>) -> Result<Self, ConfigError> {
        // 1) Load config file if present
        let (cfg_path, file_cfg) = load_file_config_with_path();
        let file_cfg = file_cfg?;
        tracing::debug!(path = %cfg_path.display(), "config resolved");

        // 2) Credential file: --file > CTFCRED_FILE > config > ~/.ctfcred.yml
        let credential_file = path
            .or_else(|| env::var("CTFCRED_FILE").ok().map(PathBuf::from))
            .or_else(|| file_cfg.credential_file.as_deref().map(expand_home))
            .unwrap_or_else(default_credential_file);

        // 3) Backups: env > config file > 0
        let backups = match env::var("CTFCRED_BACKUPS") {
            Ok(s) => s
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidEnv("CTFCRED_BACKUPS"))?,
            Err(_) => file_cfg.backups.unwrap_or(0),
        };

        let base = RowLayout::default();
        let layout = RowLayout {
            user_width: file_cfg.user_width.unwrap_or(base.user_width),
            url_width: file_cfg.url_width.unwrap_or(base.url_width),
        };

        Ok(Config {
            credential_file,
            layout,
            picker: file_cfg
                .picker
                .unwrap_or_else(|| DEFAULT_PICKER.to_string()),
            prompt: prompt
                .or(file_cfg.prompt)
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            backups,
            defaults: Defaults::new(file_cfg.default_url, file_cfg.default_domain),
            keys: file_cfg.keys.unwrap_or_default(),
        })
    }
}

pub fn config_file_path() -> PathBuf {
    // Allow tests/users to override config dir via CTFCRED_CONFIG_DIR; else use platform default
    let cfg_dir = if let Ok(p) = env::var("CTFCRED_CONFIG_DIR") {
        PathBuf::from(p)
    } else {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    cfg_dir.join("ctfcred").join("config.toml")
}

/// A missing file yields the empty config; an unreadable or malformed one is an error.
pub fn load_file_config_with_path() -> (PathBuf, Result<FileConfig, ConfigError>) {
    let path = config_file_path();
    let cfg = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<FileConfig>(&s).map_err(|e| ConfigError::InvalidFile {
            path: path.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(FileConfig::default()),
    };
    (path, cfg)
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(raw),
    }
}

fn default_credential_file() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home.join(DEFAULT_FILE_NAME);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DEFAULT_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/tmp/x.yml"), PathBuf::from("/tmp/x.yml"));
        assert!(expand_home("~/creds.yml").ends_with("creds.yml"));
        assert!(!expand_home("~/creds.yml").starts_with("~"));
    }

    #[test]
    fn file_config_parses_partial_keys_table() {
        let cfg: FileConfig = toml::from_str(
            "user_width = 12\nprompt = \"Pick\"\n[keys]\nmove_up = \"Alt+k\"\n",
        )
        .unwrap();
        assert_eq!(cfg.user_width, Some(12));
        assert_eq!(cfg.prompt.as_deref(), Some("Pick"));
        let keys = cfg.keys.unwrap();
        assert_eq!(keys.move_up, "Alt+k");
        assert_eq!(keys.copy_password, KeyBindings::default().copy_password);
    }
}
