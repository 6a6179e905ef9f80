use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config as cfg;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute origin used for canonical URLs, JSON-LD ids and the sitemap.
    #[serde(default = "SiteConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "SiteConfig::default_output_dir")]
    pub output_dir: PathBuf,
    /// Cap for "related X" sidebars.
    #[serde(default = "SiteConfig::default_related_limit")]
    pub related_limit: usize,
    #[serde(default = "SiteConfig::default_parallel")]
    pub parallel: bool,
}

impl SiteConfig {
    fn default_base_url() -> String {
        "https://www.clearviewoc.com".to_string()
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from("dist")
    }

    fn default_related_limit() -> usize {
        3
    }

    fn default_parallel() -> bool {
        true
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            output_dir: Self::default_output_dir(),
            related_limit: Self::default_related_limit(),
            parallel: Self::default_parallel(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Load catalog TOML files from this directory instead of the embedded copies.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_env")]
    pub env: String,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Self::default_env(),
            site: SiteConfig::default(),
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    fn default_env() -> String {
        env::var("APP_ENV")
            .ok()
            .or_else(|| env::var("RUST_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.site.base_url.trim();
        anyhow::ensure!(
            base.starts_with("https://") || base.starts_with("http://"),
            "site.base_url must be an absolute http(s) URL"
        );
        anyhow::ensure!(
            !base.ends_with('/'),
            "site.base_url must not end with '/'"
        );
        anyhow::ensure!(
            (1..=12).contains(&self.site.related_limit),
            "site.related_limit must be 1..=12"
        );
        anyhow::ensure!(
            !self.site.output_dir.as_os_str().is_empty(),
            "site.output_dir cannot be empty"
        );
        if let Some(dir) = &self.catalog.dir {
            anyhow::ensure!(
                !dir.as_os_str().is_empty(),
                "catalog.dir cannot be empty when set"
            );
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    settings: Settings,
    config_dir: PathBuf,
    env: String,
}

impl ConfigManager {
    /// Loads and validates settings for `env_override` (or the ambient environment name).
    pub fn new(config_dir: Option<PathBuf>, env_override: Option<String>) -> Result<Self> {
        let env_name = env_override.unwrap_or_else(Settings::default_env);
        let config_dir = Self::get_config_dir(config_dir);
        let settings = Self::load_from_sources(&config_dir, &env_name)?;
        settings.validate()?;
        Ok(Self {
            settings,
            config_dir,
            env: env_name,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    /// Get the default configuration directory.
    ///
    /// Priority order:
    /// 1. ~/.visionsite/ (user-level config)
    /// 2. ./config/ (project-level config)
    /// 3. Current directory (fallback)
    pub fn default_config_dir() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            let user_dir = home_dir.join(".visionsite");
            if user_dir.exists() {
                info!("Using config directory: {:?}", user_dir);
                return user_dir;
            }
        }

        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_config = cwd.join("config");
        if project_config.exists() {
            info!("Using config directory: {:?}", project_config);
            return project_config;
        }

        info!("Using config directory: {:?}", cwd);
        cwd
    }

    pub fn get_config_dir(custom_path: Option<PathBuf>) -> PathBuf {
        custom_path.unwrap_or_else(Self::default_config_dir)
    }

    pub fn load_from_sources(config_dir: &Path, env_name: &str) -> Result<Settings> {
        let settings: Settings = cfg::Config::builder()
            .add_source(cfg::File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                cfg::File::from(config_dir.join(format!("{}.toml", env_name))).required(false),
            )
            .add_source(cfg::File::from(config_dir.join("local.toml")).required(false))
            .add_source(cfg::Environment::with_prefix("VISIONSITE").separator("__"))
            .build()
            .context("building configuration")?
            .try_deserialize()
            .context("deserializing configuration")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.site.related_limit, 3);
        assert!(settings.catalog.dir.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut settings = Settings::default();
        settings.site.base_url = "www.example.com".into();
        assert!(settings.validate().is_err());

        settings.site.base_url = "https://www.example.com/".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_related_limit_range() {
        let mut settings = Settings::default();
        settings.site.related_limit = 0;
        assert!(settings.validate().is_err());
        settings.site.related_limit = 13;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_layered_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[site]\nbase_url = \"https://eyes.example.com\"\nrelated_limit = 5\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "[site]\nrelated_limit = 4\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let settings = ConfigManager::load_from_sources(dir.path(), "staging").unwrap();
        assert_eq!(settings.site.base_url, "https://eyes.example.com");
        assert_eq!(settings.site.related_limit, 4);
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.site.parallel);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let manager =
            ConfigManager::new(Some(dir.path().to_path_buf()), Some("test".into())).unwrap();
        assert_eq!(manager.env(), "test");
        assert_eq!(manager.settings().site.output_dir, PathBuf::from("dist"));
    }
}
