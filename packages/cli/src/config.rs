use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swatch_common::TokenSet;

pub const DEFAULT_CONFIG_NAME: &str = "swatch.config.json";

/// Swatch configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing spec documents
    #[serde(default = "default_spec_dir")]
    pub spec_dir: String,

    /// Tokens document used to resolve token references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_file: Option<String>,

    /// Extension of spec documents, without the dot
    #[serde(default = "default_spec_extension")]
    pub spec_extension: String,
}

fn default_spec_dir() -> String {
    "specs".to_string()
}

fn default_spec_extension() -> String {
    "json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the spec directory
    pub fn get_spec_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.spec_dir)
    }

    /// Load the tokens to render with. An explicit path wins over `tokensFile`;
    /// with neither, no token resolves.
    pub fn load_tokens(&self, cwd: &str, explicit: Option<&Path>) -> anyhow::Result<TokenSet> {
        let path = match (explicit, &self.tokens_file) {
            (Some(path), _) => PathBuf::from(cwd).join(path),
            (None, Some(file)) => PathBuf::from(cwd).join(file),
            (None, None) => return Ok(TokenSet::new()),
        };

        TokenSet::load(&path)
            .with_context(|| format!("Failed to load tokens from {}", path.display()))
    }

    /// Extensions may be compound, e.g. `spec.json`
    pub fn is_spec_file(&self, path: &Path) -> bool {
        let suffix = format!(".{}", self.spec_extension);
        path.is_file()
            && path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(&suffix))
                .unwrap_or(false)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spec_dir: default_spec_dir(),
            tokens_file: None,
            spec_extension: default_spec_extension(),
        }
    }
}
