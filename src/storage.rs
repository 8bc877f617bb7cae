//! JSONファイルによるキー・バリューストア
//!
//! ブラウザのlocalStorageに相当する。ファイル全体が
//! `{ "キー": "シリアライズ済みの値" }` のオブジェクト。

use florascan_common::{Error, KeyValueStore, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// ファイルストア
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let file = File::open(&self.path).map_err(storage_error)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }

    /// 書き込み用に読む。壊れたファイルは空として扱う
    fn entries_for_update(&self) -> Entries {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("storage file unreadable, starting fresh: {}", e);
                Entries::new()
            }
        }
    }

    /// 一時ファイルに書いてからrenameする（途中状態を見せない）
    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(storage_error)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path).map_err(storage_error)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush().map_err(storage_error)?;
        }
        std::fs::rename(&tmp_path, &self.path).map_err(storage_error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_for_update();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries_for_update();
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

fn storage_error(e: std::io::Error) -> Error {
    Error::Storage(e.to_string())
}
