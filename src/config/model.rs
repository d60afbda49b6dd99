// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::player::DEFAULT_COMMAND_TEMPLATE;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [player]
/// path = "/usr/local/bin/mpv"
/// command = "mpv --no-audio-display --pause %f --input-ipc-server=%s"
/// trace = false
///
/// [library]
/// music_folders = ["/srv/music"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub player: PlayerConfig,
    pub library: LibraryConfig,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(player: PlayerConfig, library: LibraryConfig) -> Self {
        Self { player, library }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(PlayerConfig::default(), LibraryConfig::default())
    }
}

/// `[player]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Explicit player executable; `None` searches `PATH` for `mpv`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Command template. `mpv` is replaced by the resolved binary, `%f` by
    /// the media file and `%s` by the control socket.
    #[serde(default = "default_command")]
    pub command: String,

    /// Forward the player's stderr to ours.
    #[serde(default)]
    pub trace: bool,

    #[serde(default = "default_socket_prefix")]
    pub socket_prefix: String,

    #[serde(default = "default_socket_suffix")]
    pub socket_suffix: String,
}

fn default_command() -> String {
    DEFAULT_COMMAND_TEMPLATE.to_string()
}

fn default_socket_prefix() -> String {
    "mpv-ctrl-".to_string()
}

fn default_socket_suffix() -> String {
    ".socket".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            path: None,
            command: default_command(),
            trace: false,
            socket_prefix: default_socket_prefix(),
            socket_suffix: default_socket_suffix(),
        }
    }
}

/// `[library]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LibraryConfig {
    /// Music folders; a folder's id is its index in this list.
    #[serde(default)]
    pub music_folders: Vec<PathBuf>,
}
