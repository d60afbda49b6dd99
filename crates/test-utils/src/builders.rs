#![allow(dead_code)]

use std::path::PathBuf;

use mpvstream::config::{ConfigFile, LibraryConfig, PlayerConfig, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                player: PlayerConfig::default(),
                library: LibraryConfig::default(),
            },
        }
    }

    pub fn player_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.player.path = Some(path.into());
        self
    }

    pub fn command(mut self, template: &str) -> Self {
        self.config.player.command = template.to_string();
        self
    }

    pub fn trace(mut self, val: bool) -> Self {
        self.config.player.trace = val;
        self
    }

    pub fn socket_affixes(mut self, prefix: &str, suffix: &str) -> Self {
        self.config.player.socket_prefix = prefix.to_string();
        self.config.player.socket_suffix = suffix.to_string();
        self
    }

    pub fn music_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.library.music_folders.push(path.into());
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
