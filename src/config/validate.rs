// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TripcheckError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TripcheckError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.store, raw.tasks))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_store(cfg)?;
    validate_tasks(cfg)?;
    Ok(())
}

fn validate_store(cfg: &RawConfigFile) -> Result<()> {
    if cfg.store.dir.as_os_str().is_empty() {
        return Err(TripcheckError::ConfigError(
            "[store].dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_tasks(cfg: &RawConfigFile) -> Result<()> {
    // gating is strongly typed and checked during deserialization.

    if cfg.tasks.default_category.trim().is_empty() {
        return Err(TripcheckError::ConfigError(
            "[tasks].default_category must not be blank".to_string(),
        ));
    }
    Ok(())
}
