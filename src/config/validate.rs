// src/config/validate.rs

use std::path::MAIN_SEPARATOR;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MpvStreamError, Result};
use crate::player::command::FILE_PLACEHOLDER;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = MpvStreamError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.player, raw.library))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_player_path(cfg)?;
    validate_command(cfg)?;
    validate_socket_affixes(cfg)?;
    validate_music_folders(cfg)?;
    Ok(())
}

fn validate_player_path(cfg: &RawConfigFile) -> Result<()> {
    if let Some(path) = &cfg.player.path {
        if path.as_os_str().is_empty() {
            return Err(MpvStreamError::ConfigError(
                "[player].path must not be empty (omit it to search PATH)".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_command(cfg: &RawConfigFile) -> Result<()> {
    let command = &cfg.player.command;
    if command.trim().is_empty() {
        return Err(MpvStreamError::ConfigError(
            "[player].command must not be empty".to_string(),
        ));
    }
    if !command.contains(FILE_PLACEHOLDER) {
        return Err(MpvStreamError::ConfigError(format!(
            "[player].command must contain the {} placeholder (got '{}')",
            FILE_PLACEHOLDER, command
        )));
    }
    Ok(())
}

fn validate_socket_affixes(cfg: &RawConfigFile) -> Result<()> {
    for (key, value) in [
        ("socket_prefix", &cfg.player.socket_prefix),
        ("socket_suffix", &cfg.player.socket_suffix),
    ] {
        if value.contains('/') || value.contains(MAIN_SEPARATOR) {
            return Err(MpvStreamError::ConfigError(format!(
                "[player].{} must not contain a path separator (got '{}')",
                key, value
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(MpvStreamError::ConfigError(format!(
                "[player].{} must not contain whitespace (got '{}')",
                key, value
            )));
        }
    }
    Ok(())
}

fn validate_music_folders(cfg: &RawConfigFile) -> Result<()> {
    for (index, folder) in cfg.library.music_folders.iter().enumerate() {
        if folder.as_os_str().is_empty() {
            return Err(MpvStreamError::ConfigError(format!(
                "[library].music_folders[{}] must not be empty",
                index
            )));
        }
    }
    if i32::try_from(cfg.library.music_folders.len()).is_err() {
        return Err(MpvStreamError::ConfigError(
            "[library].music_folders has too many entries".to_string(),
        ));
    }
    Ok(())
}
