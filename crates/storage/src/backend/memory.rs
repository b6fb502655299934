#![forbid(unsafe_code)]

use super::{KvBackend, StorageError, check_quota};
use std::collections::BTreeMap;

/// In-process medium for tests and throwaway sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, Vec<u8>>,
    quota_bytes: Option<u64>,
    disabled: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// While disabled every write fails, like a browser with storage turned off.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn used_bytes(&self) -> u64 {
        self.entries.values().map(|v| v.len() as u64).sum()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        let used_by_others = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        check_quota(self.quota_bytes, used_by_others, value.len())?;
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut backend = MemoryBackend::new().with_quota(Some(10));
        backend.put("a", b"12345").unwrap();
        backend.put("a", b"1234567890").unwrap();
        assert_eq!(backend.used_bytes(), 10);

        let err = backend.put("b", b"x").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 11,
                quota: 10
            }
        ));
        assert_eq!(backend.get("b").unwrap(), None);
    }

    #[test]
    fn disabled_backend_rejects_writes_but_still_reads() {
        let mut backend = MemoryBackend::new();
        backend.put("k", b"v").unwrap();
        backend.set_disabled(true);
        assert!(matches!(backend.put("k", b"w"), Err(StorageError::Disabled)));
        assert_eq!(backend.get("k").unwrap(), Some(b"v".to_vec()));

        backend.set_disabled(false);
        assert!(backend.remove("k").unwrap());
        assert_eq!(backend.keys().unwrap(), Vec::<String>::new());
    }
}
