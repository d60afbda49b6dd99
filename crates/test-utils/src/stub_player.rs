//! Shell-script stand-ins for the real player binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A directory holding executable stub scripts; removed on drop.
pub struct StubDir {
    dir: TempDir,
}

impl StubDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("creating stub directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `body` as an executable `/bin/sh` script named `name`.
    pub fn script(&self, name: &str, body: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))
            .with_context(|| format!("writing stub script {:?}", path))?;
        make_executable(&path)?;
        Ok(path)
    }

    /// Stub that prints its arguments, one per line, and exits 0.
    pub fn echo_args(&self, name: &str) -> Result<PathBuf> {
        self.script(name, r#"for arg in "$@"; do printf '%s\n' "$arg"; done"#)
    }

    /// Stub that exits with `code` after printing a line.
    pub fn exits_with(&self, name: &str, code: i32) -> Result<PathBuf> {
        self.script(name, &format!("echo starting\nexit {code}"))
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).with_context(|| format!("chmod +x {:?}", path))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
