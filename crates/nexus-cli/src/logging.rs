// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "nexus.log";

/// The terminal belongs to the UI, so log lines go to a file: the configured
/// path, then `NEXUS_LOG_PATH`, then the platform data dir.
pub fn resolve_log_path(configured: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return Ok(path);
    }
    if let Some(path) = env::var_os("NEXUS_LOG_PATH") {
        return Ok(PathBuf::from(path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [log].path or NEXUS_LOG_PATH")
    })?;
    Ok(data_root.join(nexus_data::APP_NAME).join(LOG_FILE_NAME))
}

pub fn init(level: LevelFilter, path: &Path) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    WriteLogger::init(level, config, file).context("install file logger")
}
