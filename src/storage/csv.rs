// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};
use tracing::warn;

use super::{Record, Storage, ensure_parent};
use crate::error::Result;

/// Row-oriented flat-text backend: one header row, one quoted-and-escaped
/// row per entity. Recovers per-row on a partially corrupt file.
pub struct CsvBackend;

impl CsvBackend {
    fn write<R: Record>(items: &[R], path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(R::HEADERS)?;
        for item in items {
            wtr.write_record(item.to_row())?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn read<R: Record>(path: &Path) -> Result<Vec<R>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let mut items = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let rec = match result {
                Ok(rec) => rec,
                Err(err) => {
                    warn!(kind = R::KIND, row = idx + 1, %err, "dropping unreadable row");
                    continue;
                }
            };
            match R::from_row(&rec) {
                Ok(mut item) => {
                    item.normalize();
                    items.push(item);
                }
                Err(err) => {
                    warn!(kind = R::KIND, row = idx + 1, %err, "dropping malformed row");
                }
            }
        }
        Ok(items)
    }
}

impl<R: Record> Storage<R> for CsvBackend {
    fn save_list(&self, items: &[R], path: &Path) -> bool {
        match Self::write(items, path) {
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
        match Self::read(path) {
            Ok(items) => items,
            Err(err) => {
                warn!(kind = R::KIND, path = %path.display(), %err, "load failed");
                Vec::new()
            }
        }
    }

    fn save_item(&self, item: &R, path: &Path) -> bool {
        self.save_list(std::slice::from_ref(item), path)
    }

    fn load_item(&self, path: &Path) -> Option<R> {
        self.load_list(path).into_iter().next()
    }
}
