// src/library.rs

//! Media folders backed by `[library].music_folders`.

use std::path::{Path, PathBuf};

use crate::config::LibraryConfig;
use crate::errors::{MpvStreamError, Result};

/// Display name given to every configured folder.
pub const MEDIA_FOLDER_NAME: &str = "Music Library";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFolder {
    pub id: i32,
    pub name: String,
    pub path: PathBuf,
}

/// Lookup of media folder records.
pub trait MediaFolderRepository {
    fn get(&self, id: i32) -> Result<MediaFolder>;
    fn get_all(&self) -> Result<Vec<MediaFolder>>;
}

/// Folders taken straight from configuration; ids are list indices.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredMediaFolders {
    folders: Vec<PathBuf>,
}

impl ConfiguredMediaFolders {
    pub fn new(library: &LibraryConfig) -> Self {
        Self {
            folders: library.music_folders.clone(),
        }
    }

    fn folder(id: i32, path: &Path) -> MediaFolder {
        MediaFolder {
            id,
            name: MEDIA_FOLDER_NAME.to_string(),
            path: path.to_path_buf(),
        }
    }
}

impl MediaFolderRepository for ConfiguredMediaFolders {
    fn get(&self, id: i32) -> Result<MediaFolder> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.folders.get(index))
            .map(|path| Self::folder(id, path))
            .ok_or(MpvStreamError::MediaFolderNotFound(id))
    }

    fn get_all(&self) -> Result<Vec<MediaFolder>> {
        Ok(self
            .folders
            .iter()
            .enumerate()
            .filter_map(|(index, path)| Some(Self::folder(i32::try_from(index).ok()?, path)))
            .collect())
    }
}
