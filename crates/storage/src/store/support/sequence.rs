#![forbid(unsafe_code)]

use super::super::{CatalogStore, StoreError};
use crate::backend::KvBackend;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::store) enum SequenceKind {
    Component,
    Product,
    BomLine,
}

impl SequenceKind {
    fn name(self) -> &'static str {
        match self {
            Self::Component => "seq:component",
            Self::Product => "seq:product",
            Self::BomLine => "seq:bom",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Component => "CMP",
            Self::Product => "PRD",
            Self::BomLine => "BOM",
        }
    }

    fn format(self, seq: u64) -> String {
        format!("{}-{seq:04}", self.prefix())
    }
}

impl<B: KvBackend> CatalogStore<B> {
    /// Allocates the next id of `kind`. Ids for which `taken` returns true are
    /// skipped, so a lost or stale counter never produces a duplicate.
    pub(in crate::store) fn next_id(
        &mut self,
        kind: SequenceKind,
        taken: impl Fn(&str) -> bool,
    ) -> Result<String, StoreError> {
        let key = self.key_for(kind.name());
        let current = self.read_counter(&key);

        let mut next = match current.checked_add(1) {
            Some(next) => next,
            None => {
                log::warn!("{key} is at its maximum, restarting the counter");
                1
            }
        };
        let mut id = kind.format(next);
        while taken(&id) {
            next = next
                .checked_add(1)
                .ok_or(StoreError::InvalidInput("id sequence exhausted"))?;
            id = kind.format(next);
        }

        self.backend.put(&key, next.to_string().as_bytes())?;
        Ok(id)
    }

    fn read_counter(&self, key: &str) -> u64 {
        match self.backend.get(key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<u64>(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("{key} holds an unreadable counter, restarting it: {err}");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                log::warn!("reading {key} failed, restarting the counter: {err}");
                0
            }
        }
    }
}
