// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::Store;
use crate::models::{Settings, StorageFormat};
use crate::utils::data_dir;

/// Owns the settings file. Settings always live as one JSON document at a
/// fixed location: the file must be readable before the configured storage
/// format is known.
pub struct SettingsService {
    root: PathBuf,
    store: Store<Settings>,
}

impl SettingsService {
    pub fn open() -> Result<Self> {
        Ok(Self::at(&data_dir()?))
    }

    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            store: Store::at(root, StorageFormat::Json),
        }
    }

    /// Stored settings, or defaults rooted at this service's directory when
    /// the file is absent or unreadable.
    pub fn load(&self) -> Settings {
        let mut settings = self.store.load_item().unwrap_or_default();
        if settings.storage_root.as_os_str().is_empty() {
            settings.storage_root = self.root.clone();
        }
        settings
    }

    pub fn save(&self, settings: &Settings) -> bool {
        self.store.save_item(settings)
    }

    pub fn create_backup(&self) -> bool {
        self.store.create_backup()
    }

    pub fn exists(&self) -> bool {
        self.store.exists()
    }

    pub fn storage_path(&self) -> &Path {
        self.store.path()
    }
}
