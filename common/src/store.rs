//! キー・バリュー永続ストア
//!
//! ブラウザのlocalStorage、CLIのJSONファイルなどを同じ形で扱う。
//! 値はシリアライズ済みの文字列。

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

/// データセットを保存するキー
pub const DATASET_KEY: &str = "floraScanDataset";

/// 識別結果を保存するキー（結果ページが1回読む）
pub const RESULT_KEY: &str = "plantResult";

/// 文字列値のキー・バリューストア
pub trait KeyValueStore {
    /// 値を読む。キーがなければ `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 値を丸ごと置き換える
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// キーを削除する。存在しなくてもエラーにしない
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// メモリ上のストア（テスト用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert!(!store.contains("k"));
        store.remove("k").unwrap();
    }

    #[test]
    fn test_store_by_reference() {
        let store = MemoryStore::new();
        let by_ref = &store;
        by_ref.set(DATASET_KEY, "[]").unwrap();
        assert!(store.contains(DATASET_KEY));
    }
}
