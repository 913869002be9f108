use anyhow::Context;
use flowscrub_core::{DEFAULT_SETTINGS_ALLOWLIST, Placeholders, Sanitizer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project config file name, looked up from the current directory upwards
pub const PROJECT_FILE: &str = "flowscrub.toml";

/// Configuration for flowscrub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Workflow files to sanitize (relative to the base dir, globs allowed)
    #[serde(default = "default_inputs")]
    pub inputs: Vec<String>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub placeholders: Placeholders,

    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_allowlist")]
    pub allowlist: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            output_dir: default_output_dir(),
            placeholders: Placeholders::default(),
            settings: SettingsConfig::default(),
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            allowlist: default_allowlist(),
        }
    }
}

fn default_inputs() -> Vec<String> {
    vec![
        "document-ingestion-workflow.json".to_string(),
        "query-interface-workflow.json".to_string(),
    ]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("workflows")
}

fn default_allowlist() -> Vec<String> {
    DEFAULT_SETTINGS_ALLOWLIST
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    pub source: ConfigSource,
    /// Directory that relative inputs and the output dir are resolved against
    pub base_dir: PathBuf,
}

impl Config {
    /// Resolve configuration for a run started in `cwd`.
    ///
    /// Order: `explicit` path, nearest `flowscrub.toml` walking up from `cwd`,
    /// the user config file, built-in defaults. Never writes anything.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<ResolvedConfig> {
        Self::resolve_with(explicit, cwd, Self::user_config_path())
    }

    /// Same as [`Config::resolve`] with the user config location supplied
    pub fn resolve_with(
        explicit: Option<&Path>,
        cwd: &Path,
        user_config: Option<PathBuf>,
    ) -> anyhow::Result<ResolvedConfig> {
        if let Some(path) = explicit {
            let config = Self::load_from(path)?;
            return Ok(ResolvedConfig {
                config,
                source: ConfigSource::Explicit(path.to_path_buf()),
                base_dir: parent_or(path, cwd),
            });
        }

        if let Some(path) = Self::find_project_file_from(cwd) {
            let config = Self::load_from(&path)?;
            return Ok(ResolvedConfig {
                config,
                base_dir: parent_or(&path, cwd),
                source: ConfigSource::Project(path),
            });
        }

        if let Some(path) = user_config
            && path.is_file()
        {
            let config = Self::load_from(&path)?;
            return Ok(ResolvedConfig {
                config,
                source: ConfigSource::User(path),
                base_dir: cwd.to_path_buf(),
            });
        }

        Ok(ResolvedConfig {
            config: Config::default(),
            source: ConfigSource::Defaults,
            base_dir: cwd.to_path_buf(),
        })
    }

    /// Load config from a TOML file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write config as TOML
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Find flowscrub.toml by walking up from given directory
    pub fn find_project_file_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "flowscrub", "flowscrub")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn sanitizer(&self) -> Sanitizer {
        Sanitizer::new(self.placeholders.clone(), self.settings.allowlist.clone())
    }
}

fn parent_or(path: &Path, fallback: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => fallback.to_path_buf(),
    }
}
