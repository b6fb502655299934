#![forbid(unsafe_code)]

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Failure of the underlying medium. Callers treat it as non-fatal.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    QuotaExceeded { required: u64, quota: u64 },
    Disabled,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::QuotaExceeded { required, quota } => {
                write!(f, "quota exceeded (required={required}, quota={quota})")
            }
            Self::Disabled => write!(f, "storage is disabled"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sql(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Disabled => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

/// Durable key to bytes mapping. A `put` either stores the whole value or
/// leaves the previous one untouched.
pub trait KvBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;

    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

pub(crate) fn check_quota(
    quota: Option<u64>,
    used_by_others: u64,
    value_len: usize,
) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let required = used_by_others.saturating_add(value_len as u64);
    if required > quota {
        return Err(StorageError::QuotaExceeded { required, quota });
    }
    Ok(())
}
