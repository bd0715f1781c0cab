// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::{Record, Storage, ensure_parent};
use crate::error::Result;

/// Structured hierarchical backend: the whole collection is one JSON
/// document. A document that fails to parse yields an empty collection.
pub struct JsonBackend;

impl JsonBackend {
    fn write<T: Serialize>(value: &T, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}

impl<R: Record> Storage<R> for JsonBackend {
    fn save_list(&self, items: &[R], path: &Path) -> bool {
        match Self::write(&items, path) {
            Ok(()) => true,
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "save failed");
                false
            }
        }
    }

    fn load_list(&self, path: &Path) -> Vec<R> {
        if !path.exists() {
            return Vec::new();
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "load failed");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<R>>(&text) {
            Ok(mut items) => {
                for item in &mut items {
                    item.normalize();
                }
                items
            }
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "unparseable document");
                Vec::new()
            }
        }
    }

    fn save_item(&self, item: &R, path: &Path) -> bool {
        match Self::write(item, path) {
            Ok(()) => true,
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "save failed");
                false
            }
        }
    }

    fn load_item(&self, path: &Path) -> Option<R> {
        if !path.exists() {
            return None;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "load failed");
                return None;
            }
        };
        match serde_json::from_str::<R>(&text) {
            Ok(mut item) => {
                item.normalize();
                Some(item)
            }
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "unparseable document");
                None
            }
        }
    }
}
