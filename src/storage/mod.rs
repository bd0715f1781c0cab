// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod csv;
pub mod json;
mod records;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::StorageFormat;

pub use self::csv::CsvBackend;
pub use self::json::JsonBackend;

/// Serializer/deserializer pair for one record kind. The serde bounds feed
/// the hierarchical backend; the header/row methods feed the flat one.
pub trait Record: Serialize + DeserializeOwned {
    /// File stem of the storage file, also used in diagnostics.
    const KIND: &'static str;
    const HEADERS: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;
    fn from_row(row: &::csv::StringRecord) -> crate::error::Result<Self>;

    /// Re-establish field invariants after deserialization; applied by every
    /// backend so callers observe identical values regardless of format.
    fn normalize(&mut self) {}
}

/// File persistence for a homogeneous collection or a single item. Failures
/// never propagate: writes report `false`, reads fall back to empty, and the
/// diagnostic goes to the log.
pub trait Storage<R: Record> {
    fn save_list(&self, items: &[R], path: &Path) -> bool;
    fn load_list(&self, path: &Path) -> Vec<R>;
    fn save_item(&self, item: &R, path: &Path) -> bool;
    fn load_item(&self, path: &Path) -> Option<R>;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Byte-copy to `backup_path`, overwriting any prior backup; `false`
    /// when the source file does not exist.
    fn backup(&self, path: &Path, backup_path: &Path) -> bool {
        if !path.exists() {
            warn!(source = %path.display(), "backup skipped, source missing");
            return false;
        }
        match fs::copy(path, backup_path) {
            Ok(_) => true,
            Err(err) => {
                warn!(source = %path.display(), %err, "backup failed");
                false
            }
        }
    }
}

pub fn backend_for<R: Record>(format: StorageFormat) -> Box<dyn Storage<R>> {
    match format {
        StorageFormat::Csv => Box::new(CsvBackend),
        StorageFormat::Json => Box::new(JsonBackend),
    }
}

/// Storage file for a record kind under `root`, e.g. `transactions.csv`.
pub fn record_path<R: Record>(root: &Path, format: StorageFormat) -> PathBuf {
    root.join(format!("{}.{}", R::KIND, format.extension()))
}

/// The `<file>.backup` sibling of `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".backup");
    path.with_file_name(name)
}

pub(crate) fn ensure_parent(path: &Path) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
