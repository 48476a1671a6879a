// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use log::LevelFilter;
use nexus_app::TabKind;
use nexus_app::table::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use serde::Deserialize;
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_page: Option<String>,
    pub sidebar_collapsed: Option<bool>,
    pub page_size: Option<i64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_page: Some(TabKind::Dashboard.label().to_owned()),
            sidebar_collapsed: Some(false),
            page_size: Some(DEFAULT_PAGE_SIZE.get() as i64),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("NEXUS_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set NEXUS_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(nexus_data::APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [ui] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(page) = &self.ui.start_page
            && TabKind::parse(page).is_none()
        {
            let pages = TabKind::ALL
                .iter()
                .map(|tab| tab.label())
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "ui.start_page in {} must be one of {pages}, got {page:?}",
                path.display()
            );
        }

        if let Some(size) = self.ui.page_size
            && !PAGE_SIZE_OPTIONS.iter().any(|option| *option as i64 == size)
        {
            bail!(
                "ui.page_size in {} must be one of {:?}, got {}",
                path.display(),
                PAGE_SIZE_OPTIONS,
                size
            );
        }

        if let Some(level) = &self.log.level {
            parse_level(level).with_context(|| format!("log.level in {}", path.display()))?;
        }

        if let Some(log_path) = &self.log.path
            && !Path::new(log_path).is_absolute()
        {
            bail!(
                "log.path in {} must be an absolute path, got {log_path:?}",
                path.display()
            );
        }

        Ok(())
    }

    pub fn start_page(&self) -> TabKind {
        self.ui
            .start_page
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::Dashboard)
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.ui.sidebar_collapsed.unwrap_or(false)
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.ui
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .and_then(NonZeroUsize::new)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log
            .level
            .as_deref()
            .and_then(|level| parse_level(level).ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.path.as_ref().map(PathBuf::from)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# office-nexus config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# One of: dashboard, users, roles, menus, offices, departments\nstart_page = \"dashboard\"\nsidebar_collapsed = false\n# One of: 10, 20, 30, 40, 50\npage_size = {}\n\n[log]\n# One of: off, error, warn, info, debug, trace\nlevel = \"{}\"\n# Optional. Default is platform data dir (for example ~/.local/share/office-nexus/nexus.log)\n# path = \"/absolute/path/to/nexus.log\"\n",
            path.display(),
            DEFAULT_PAGE_SIZE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(raw.trim())
        .map_err(|_| anyhow!("invalid log level {raw:?}; use off, error, warn, info, debug or trace"))
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_level};
    use anyhow::Result;
    use log::LevelFilter;
    use nexus_app::TabKind;
    use nexus_testkit::temp_config_path;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let (temp, path) = temp_config_path()?;
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_page(), TabKind::Dashboard);
        assert!(!config.sidebar_collapsed());
        assert_eq!(config.page_size().get(), 10);
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.log_path(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\npage_size = 20\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui] and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nstart_page = \"Offices\"\nsidebar_collapsed = true\npage_size = 30\n[log]\nlevel = \"debug\"\npath = \"/var/log/nexus.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.start_page(), TabKind::Offices);
        assert!(config.sidebar_collapsed());
        assert_eq!(config.page_size().get(), 30);
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.log_path(), Some(PathBuf::from("/var/log/nexus.log")));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn page_size_outside_options_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\npage_size = 25\n")?;
        let error = Config::load(&path).expect_err("page size 25 should fail");
        let message = error.to_string();
        assert!(message.contains("ui.page_size"), "unexpected message: {message}");
        assert!(message.contains("got 25"));
        Ok(())
    }

    #[test]
    fn unknown_start_page_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_page = \"settings\"\n")?;
        let error = Config::load(&path).expect_err("unknown page should fail");
        let message = error.to_string();
        assert!(message.contains("ui.start_page"));
        assert!(message.contains("dashboard, users, roles"));
        Ok(())
    }

    #[test]
    fn invalid_log_settings_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("unknown level should fail");
        assert!(format!("{error:#}").contains("invalid log level"));

        let (_temp, path) = write_config("version = 1\n[log]\npath = \"relative/nexus.log\"\n")?;
        let error = Config::load(&path).expect_err("relative log path should fail");
        assert!(error.to_string().contains("must be an absolute path"));
        Ok(())
    }

    #[test]
    fn level_parsing_is_case_insensitive() -> Result<()> {
        assert_eq!(parse_level("WARN")?, LevelFilter::Warn);
        assert_eq!(parse_level(" off ")?, LevelFilter::Off);
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("NEXUS_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("NEXUS_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_app_directory_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("NEXUS_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("office-nexus/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let (_temp, path) = temp_config_path()?;
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.page_size().get(), 10);
        assert_eq!(config.start_page(), TabKind::Dashboard);
        Ok(())
    }
}
