use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_API_BASE: &str = "https://api.line.me";
const DEFAULT_WEAKNESS_IMAGE_URL: &str =
    "https://github.com/monhan-chat/mhwilds-line-bot/blob/main/images/weakpoint.jpg?raw=true";
const DEFAULT_TEMPERED_IMAGE_URL: &str =
    "https://github.com/monhan-chat/mhwilds-line-bot/blob/main/images/tempered.jpg?raw=true";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read config file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse config file '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    channel_access_token: String,
    #[serde(default)]
    channel_secret: String,
    port: Option<u16>,
    /// Directory holding the JSON datasets. Defaults to "data".
    data_dir: Option<String>,
    /// Directory for log files. Defaults to "{data_dir}/logs".
    log_dir: Option<String>,
    api_base: Option<String>,
    /// Empty string disables the image.
    weakness_image_url: Option<String>,
    tempered_image_url: Option<String>,
    /// Extra monster nicknames: alias → canonical name.
    #[serde(default)]
    monster_aliases: HashMap<String, String>,
}

#[derive(Debug)]
pub struct Config {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// LINE API base URL, without trailing slash.
    pub api_base: String,
    pub weakness_image_url: Option<String>,
    pub tempered_image_url: Option<String>,
    pub monster_aliases: HashMap<String, String>,
}

impl Config {
    /// Load from `path` (optional) and the process environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load from `path`, taking overrides from `env`. A missing file means
    /// all defaults.
    pub fn load_with_env<P, F>(path: P, env: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let config_path = path.as_ref().to_path_buf();
        let file = match std::fs::read_to_string(&config_path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?,
            Err(e) if e.kind() == ErrorKind::NotFound => ConfigFile::default(),
            Err(e) => return Err(ConfigError::ReadFile { path: config_path, source: e }),
        };

        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let channel_access_token = env("LINE_CHANNEL_ACCESS_TOKEN").unwrap_or(file.channel_access_token);
        let channel_secret = env("LINE_CHANNEL_SECRET").unwrap_or(file.channel_secret);
        let port = match env("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Validation(format!("PORT is not a valid port: {port}")))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        // Validate required fields
        if channel_access_token.trim().is_empty() {
            return Err(ConfigError::Validation("channel_access_token is required".into()));
        }
        if channel_secret.trim().is_empty() {
            return Err(ConfigError::Validation("channel_secret is required".into()));
        }
        if port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".into()));
        }

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        let log_dir = file
            .log_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("logs"));

        Ok(Self {
            channel_access_token,
            channel_secret,
            port,
            data_dir,
            log_dir,
            api_base: file
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            weakness_image_url: image_url(file.weakness_image_url, DEFAULT_WEAKNESS_IMAGE_URL),
            tempered_image_url: image_url(file.tempered_image_url, DEFAULT_TEMPERED_IMAGE_URL),
            monster_aliases: file.monster_aliases,
        })
    }
}

fn image_url(configured: Option<String>, default: &str) -> Option<String> {
    match configured {
        Some(url) if url.trim().is_empty() => None,
        Some(url) => Some(url),
        None => Some(default.to_string()),
    }
}
