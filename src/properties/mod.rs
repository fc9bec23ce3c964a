//! Property store: flat key/value tables and layered lookup.
//!
//! A [`PropertySource`] resolves one flat key to a string. Keys may contain
//! `.` to express hierarchy by convention, but the store treats each key as
//! one opaque string.

mod de;
#[cfg(feature = "std")]
mod io;
mod parser;
mod table;

use crate::error::{Error, LoadError, Result};

use table::Table;

#[cfg(feature = "std")]
pub use io::load_properties;
#[cfg(feature = "std")]
pub(crate) use io::load_named;
pub use parser::MAX_CONTINUATION_LINES;

/// Maximum number of entries in a [`Properties`] table without `alloc`
/// (power of two).
pub const MAX_PROPERTIES: usize = 128;

/// Maximum length of a property key in bytes without `alloc`.
pub const MAX_KEY_LEN: usize = 64;

/// Maximum length of a property value in bytes without `alloc`.
pub const MAX_VALUE_LEN: usize = 64;

/// Stored property key.
#[cfg(feature = "alloc")]
pub type Key = alloc::string::String;

/// Stored property key.
#[cfg(not(feature = "alloc"))]
pub type Key = heapless::String<MAX_KEY_LEN>;

/// Stored property value.
#[cfg(feature = "alloc")]
pub type Value = alloc::string::String;

/// Stored property value.
#[cfg(not(feature = "alloc"))]
pub type Value = heapless::String<MAX_VALUE_LEN>;

/// Anything that can resolve a flat property key.
pub trait PropertySource {
    /// Resolve `key`, or `None` if no layer defines it.
    fn property(&self, key: &str) -> Option<&str>;
}

impl<S: PropertySource + ?Sized> PropertySource for &S {
    fn property(&self, key: &str) -> Option<&str> {
        (**self).property(key)
    }
}

/// Flat, insertion-ordered property table.
///
/// Heap-backed and unbounded with `alloc`; otherwise limited to
/// [`MAX_PROPERTIES`] entries of [`MAX_KEY_LEN`]/[`MAX_VALUE_LEN`] bytes.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Table,
}

impl Properties {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Table::default(),
        }
    }

    /// Build a table from key/value pairs. Later pairs replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns a load error if a key or value is too long or the table fills up.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut properties = Self::new();
        for (key, value) in pairs {
            properties.insert(key, value)?;
        }
        Ok(properties)
    }

    /// Parse properties-file text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed escapes or when capacities are exceeded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use robo_properties::Properties;
    ///
    /// let props = Properties::parse("drive.left.port = 1\n# comment\n").unwrap();
    /// assert_eq!(props.get("drive.left.port"), Some("1"));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut properties = Self::new();
        parser::parse_into(&mut properties, text)?;
        Ok(properties)
    }

    /// Set `key` to `value`, returning the previous value if any.
    ///
    /// # Errors
    ///
    /// Without `alloc`, returns a load error if the key or value exceeds its
    /// capacity, or if the key is new and the table is full.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<Option<Value>> {
        let key = Key::try_from(key).map_err(|_| Error::Load(LoadError::KeyTooLong { line: 0 }))?;
        let value =
            Value::try_from(value).map_err(|_| Error::Load(LoadError::ValueTooLong { line: 0 }))?;
        self.insert_owned(key, value)
    }

    pub(crate) fn insert_owned(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
        self.entries.insert(key, value)
    }

    /// Look up `key` in this table only.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    /// Check if `key` is defined in this table.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl PropertySource for Properties {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

#[cfg(feature = "alloc")]
impl PropertySource for alloc::collections::BTreeMap<alloc::string::String, alloc::string::String> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_str())
    }
}

#[cfg(feature = "std")]
impl<H: core::hash::BuildHasher> PropertySource for std::collections::HashMap<std::string::String, std::string::String, H> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_str())
    }
}

/// Two-layer source: `overrides` is checked first, then `base`.
#[derive(Debug, Clone, Default)]
pub struct Layered<B, O> {
    base: B,
    overrides: O,
}

impl<B: PropertySource, O: PropertySource> Layered<B, O> {
    /// Layer `overrides` on top of `base`.
    pub fn new(base: B, overrides: O) -> Self {
        Self { base, overrides }
    }

    /// The fallback layer.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The layer checked first.
    pub fn overrides(&self) -> &O {
        &self.overrides
    }
}

impl<B: PropertySource, O: PropertySource> PropertySource for Layered<B, O> {
    fn property(&self, key: &str) -> Option<&str> {
        self.overrides
            .property(key)
            .or_else(|| self.base.property(key))
    }
}
