//! Insertion-ordered entry storage behind [`Properties`](super::Properties).
//!
//! With `alloc` the table grows on the heap and keys and values have no
//! length limit. Bare `no_std` builds use a fixed-capacity `heapless` map.

use crate::error::Result;

use super::{Key, Value};

#[cfg(feature = "alloc")]
pub(super) use self::heap::Table;
#[cfg(not(feature = "alloc"))]
pub(super) use self::fixed::Table;

#[cfg(feature = "alloc")]
mod heap {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use super::{Key, Result, Value};

    #[derive(Debug, Clone, Default)]
    pub(crate) struct Table {
        entries: Vec<(Key, Value)>,
        index: BTreeMap<Key, usize>,
    }

    impl Table {
        pub(crate) fn get(&self, key: &str) -> Option<&str> {
            let slot = *self.index.get(key)?;
            self.entries.get(slot).map(|(_, v)| v.as_str())
        }

        pub(crate) fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
            if let Some(entry) = self
                .index
                .get(key.as_str())
                .and_then(|&slot| self.entries.get_mut(slot))
            {
                return Ok(Some(core::mem::replace(&mut entry.1, value)));
            }
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
            Ok(None)
        }

        pub(crate) fn len(&self) -> usize {
            self.entries.len()
        }

        pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
            self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
        }
    }
}

#[cfg(not(feature = "alloc"))]
mod fixed {
    use heapless::FnvIndexMap;

    use crate::error::{Error, LoadError};
    use crate::properties::MAX_PROPERTIES;

    use super::{Key, Result, Value};

    #[derive(Debug, Clone, Default)]
    pub(crate) struct Table {
        entries: FnvIndexMap<Key, Value, MAX_PROPERTIES>,
    }

    impl Table {
        pub(crate) fn get(&self, key: &str) -> Option<&str> {
            // No stored key can be longer than the key capacity.
            let key = Key::try_from(key).ok()?;
            self.entries.get(&key).map(|v| v.as_str())
        }

        pub(crate) fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
            if let Some(slot) = self.entries.get_mut(&key) {
                return Ok(Some(core::mem::replace(slot, value)));
            }
            self.entries
                .insert(key, value)
                .map_err(|_| Error::Load(LoadError::CapacityExceeded))
        }

        pub(crate) fn len(&self) -> usize {
            self.entries.len()
        }

        pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
            self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
        }
    }
}
