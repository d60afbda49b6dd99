// src/player/resolver.rs

//! Locating the player executable.
//!
//! Lookup happens at most once per [`BinaryResolver`]; the outcome, success
//! or failure, is cached for the resolver's lifetime. Construct one resolver
//! at startup and share it (e.g. behind an `Arc`) with every player.
//!
//! `PATH` entries that are relative, such as `.`, are resolved against the
//! working directory, so a player sitting in the current folder is found
//! only when `PATH` lists it, and always comes back as an absolute path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{info, warn};

use crate::errors::{MpvStreamError, Result};

/// Binary searched on `PATH` when no explicit path is configured.
pub const DEFAULT_BINARY: &str = "mpv";

#[derive(Debug)]
pub struct BinaryResolver {
    binary: String,
    configured: Option<PathBuf>,
    search: Option<SearchPath>,
    resolved: OnceLock<std::result::Result<PathBuf, String>>,
}

impl BinaryResolver {
    /// Resolver for the default `mpv` binary, optionally pinned to a path.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self::with_binary(DEFAULT_BINARY, configured)
    }

    pub fn with_binary(binary: impl Into<String>, configured: Option<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            configured,
            search: None,
            resolved: OnceLock::new(),
        }
    }

    /// Search `paths` (a `PATH`-style list) relative to `cwd` instead of the
    /// process environment.
    pub fn with_search_path(mut self, paths: impl Into<OsString>, cwd: impl Into<PathBuf>) -> Self {
        self.search = Some(SearchPath {
            paths: paths.into(),
            cwd: cwd.into(),
        });
        self
    }

    /// Bare name of the player binary, as it appears in command templates.
    pub fn binary_name(&self) -> &str {
        &self.binary
    }

    /// Whether a template token stands for the player binary.
    pub fn matches_binary(&self, token: &str) -> bool {
        token == self.binary
            || token
                .strip_prefix(self.binary.as_str())
                .is_some_and(|rest| rest == ".exe")
    }

    /// Absolute path of the player binary.
    ///
    /// The first call performs the lookup; concurrent first callers wait for
    /// it, and every later call returns the cached result without searching
    /// again, even if a failed lookup would now succeed.
    pub fn resolve(&self) -> Result<&Path> {
        match self.resolved.get_or_init(|| self.lookup()) {
            Ok(path) => Ok(path.as_path()),
            Err(reason) => Err(MpvStreamError::BinaryNotFound {
                binary: self.display_name(),
                reason: reason.clone(),
            }),
        }
    }

    fn display_name(&self) -> String {
        match &self.configured {
            Some(path) => path.display().to_string(),
            None => self.binary.clone(),
        }
    }

    fn lookup(&self) -> std::result::Result<PathBuf, String> {
        let found = match &self.configured {
            Some(path) => which::which(path).map_err(|e| e.to_string()),
            None => self.lookup_on_search_path(),
        };

        match &found {
            Ok(path) => info!(binary = %self.binary, path = %path.display(), "found player binary"),
            Err(reason) => warn!(binary = %self.display_name(), reason = %reason, "player binary not found"),
        }
        found
    }

    fn lookup_on_search_path(&self) -> std::result::Result<PathBuf, String> {
        let found = match &self.search {
            Some(search) => which::which_in(&self.binary, Some(&search.paths), &search.cwd)
                .map(|path| search.cwd.join(path)),
            None => which::which(&self.binary),
        };
        found.map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone)]
struct SearchPath {
    paths: OsString,
    cwd: PathBuf,
}
