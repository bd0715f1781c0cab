// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod saving_goals;
pub mod settings;
pub mod special_dates;
pub mod transactions;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::models::{Settings, StorageFormat};
use crate::storage::{self, Record, Storage};

/// Entities addressable by their process-assigned id. The id is the sole
/// equality key for mutations.
pub trait Keyed {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! keyed {
    ($ty:ty) => {
        impl Keyed for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        }
    };
}

keyed!(crate::models::Transaction);
keyed!(crate::models::Budget);
keyed!(crate::models::SpecialDate);
keyed!(crate::models::SavingGoal);

/// One record kind's file plus the backend that reads and writes it. Holds
/// no cached state: every read goes back to storage.
pub struct Store<R: Record> {
    path: PathBuf,
    backend: Box<dyn Storage<R>>,
}

impl<R: Record> Store<R> {
    pub fn open(settings: &Settings) -> Self {
        Self::at(&settings.storage_root, settings.storage_format)
    }

    pub fn at(root: &Path, format: StorageFormat) -> Self {
        Self {
            path: storage::record_path::<R>(root, format),
            backend: storage::backend_for::<R>(format),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<R> {
        self.backend.load_list(&self.path)
    }

    pub fn save(&self, items: &[R]) -> bool {
        self.backend.save_list(items, &self.path)
    }

    pub fn load_item(&self) -> Option<R> {
        self.backend.load_item(&self.path)
    }

    pub fn save_item(&self, item: &R) -> bool {
        self.backend.save_item(item, &self.path)
    }

    pub fn exists(&self) -> bool {
        self.backend.exists(&self.path)
    }

    pub fn create_backup(&self) -> bool {
        self.backend
            .backup(&self.path, &storage::backup_path(&self.path))
    }
}

impl<R: Record + Keyed + Clone> Store<R> {
    /// Appends with the next free id. Whole-file last-write-wins, like every
    /// mutation here; single logical writer assumed.
    pub fn add(&self, mut item: R) -> Option<i64> {
        let mut items = self.load();
        let id = items.iter().map(Keyed::id).max().unwrap_or(0) + 1;
        item.set_id(id);
        items.push(item);
        if self.save(&items) { Some(id) } else { None }
    }

    /// Replaces the entry with the same id; `false` (and no rewrite) when
    /// the id is absent.
    pub fn update(&self, item: &R) -> bool {
        let mut items = self.load();
        let Some(slot) = items.iter_mut().find(|x| x.id() == item.id()) else {
            warn!(kind = R::KIND, id = item.id(), "update target not found");
            return false;
        };
        *slot = item.clone();
        self.save(&items)
    }

    /// Removes the entry with this id; `false` (and no rewrite) when absent.
    pub fn delete(&self, id: i64) -> bool {
        let mut items = self.load();
        let before = items.len();
        items.retain(|x| x.id() != id);
        if items.len() == before {
            warn!(kind = R::KIND, id, "delete target not found");
            return false;
        }
        self.save(&items)
    }
}
