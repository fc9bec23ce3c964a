//! Typed access to nested properties.
//!
//! A path is an ordered slice of segments joined with `.` into one flat key.
//! Every getter reports a missing key as `Ok(None)`; a present value that
//! does not convert to the requested type is an error, never a default.

use core::fmt::Write;

use crate::error::{error_text, joined_text, ArgumentError, Error, Result, ValueError};
use crate::properties::{Key, Layered, Properties, PropertySource};

/// Separator placed between path segments.
pub const PATH_SEPARATOR: char = '.';

/// An enum whose members can be named in a property value.
///
/// Implement it with the [`property_enum!`](crate::property_enum) macro, or
/// by hand by listing every member with the exact text that selects it.
pub trait PropertyEnum: Copy + 'static {
    /// Member names and values. Matching is exact and case-sensitive.
    const MEMBERS: &'static [(&'static str, Self)];

    /// Look up a member by name.
    fn from_name(name: &str) -> Option<Self> {
        lookup(Self::MEMBERS, name)
    }

    /// The name that selects this member.
    fn name(self) -> &'static str
    where
        Self: PartialEq,
    {
        Self::MEMBERS
            .iter()
            .find(|(_, member)| *member == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

fn lookup<T: Copy>(members: &[(&str, T)], name: &str) -> Option<T> {
    members
        .iter()
        .find(|(member, _)| *member == name)
        .map(|(_, value)| *value)
}

/// Declare an enum together with its [`PropertyEnum`] member table.
///
/// Each member is selected by its own identifier unless a name is given.
///
/// ```rust
/// use robo_properties::{property_enum, PropertyEnum};
///
/// property_enum! {
///     /// Alliance colour.
///     pub enum Alliance {
///         Red,
///         Blue = "blue",
///     }
/// }
///
/// assert_eq!(Alliance::from_name("Red"), Some(Alliance::Red));
/// assert_eq!(Alliance::from_name("blue"), Some(Alliance::Blue));
/// ```
#[macro_export]
macro_rules! property_enum {
    (@name $variant:ident $text:literal) => { $text };
    (@name $variant:ident) => { ::core::stringify!($variant) };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $text:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::PropertyEnum for $name {
            const MEMBERS: &'static [(&'static str, Self)] = &[
                $(
                    ($crate::property_enum!(@name $variant $($text)?), $name::$variant),
                )+
            ];
        }
    };
}

/// Typed, path-based view over a [`PropertySource`].
///
/// # Example
///
/// ```rust
/// use robo_properties::PropertyLoader;
///
/// let loader = PropertyLoader::parse("arm.port = 3\narm.gain = 0.5\n").unwrap();
/// assert_eq!(loader.get_int(&["arm", "port"]).unwrap(), Some(3));
/// assert_eq!(loader.get_double(&["arm", "gain"]).unwrap(), Some(0.5));
/// assert_eq!(loader.get_int(&["arm", "missing"]).unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct PropertyLoader<S> {
    source: S,
}

impl<S: PropertySource> PropertyLoader<S> {
    /// View an existing source.
    ///
    /// Passing `&Properties` borrows the caller's table without copying it;
    /// the table cannot change while the loader exists.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Give back the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Get the raw value at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing("path")` if `path` is empty.
    pub fn get_string(&self, path: &[&str]) -> Result<Option<&str>> {
        self.resolve(path)
    }

    /// Get the value at `path` as a 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing("path")` if `path` is empty, or
    /// `ValueError::InvalidInteger` if the value is present but not a
    /// decimal integer.
    pub fn get_int(&self, path: &[&str]) -> Result<Option<i32>> {
        let Some(value) = self.resolve(path)? else {
            return Ok(None);
        };
        value.parse::<i32>().map(Some).map_err(|_| {
            Error::Value(ValueError::InvalidInteger {
                key: joined_text(path),
                value: error_text(value),
            })
        })
    }

    /// Get the value at `path` as a double.
    ///
    /// Surrounding whitespace is ignored. The only non-finite spellings
    /// accepted are `Infinity` and `NaN`, optionally signed.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing("path")` if `path` is empty, or
    /// `ValueError::InvalidFloat` if the value is present but not a number.
    pub fn get_double(&self, path: &[&str]) -> Result<Option<f64>> {
        let Some(value) = self.resolve(path)? else {
            return Ok(None);
        };
        parse_double(value).map(Some).ok_or_else(|| {
            Error::Value(ValueError::InvalidFloat {
                key: joined_text(path),
                value: error_text(value),
            })
        })
    }

    /// Get the value at `path` as a member of `T`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing("path")` if `path` is empty, or
    /// `ValueError::UnknownMember` if the value names no member of `T`.
    pub fn get_enum<T: PropertyEnum>(&self, path: &[&str]) -> Result<Option<T>> {
        self.get_enum_from(T::MEMBERS, path)
    }

    /// Get the value at `path` as one of `members`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing("members")` if `members` is empty,
    /// `ArgumentError::Missing("path")` if `path` is empty, or
    /// `ValueError::UnknownMember` if the value names none of `members`.
    pub fn get_enum_from<T: Copy>(&self, members: &[(&str, T)], path: &[&str]) -> Result<Option<T>> {
        if members.is_empty() {
            return Err(Error::Argument(ArgumentError::Missing("members")));
        }
        let Some(value) = self.resolve(path)? else {
            return Ok(None);
        };
        lookup(members, value).map(Some).ok_or_else(|| {
            Error::Value(ValueError::UnknownMember {
                key: joined_text(path),
                value: error_text(value),
            })
        })
    }

    /// Check if `path` resolves to a value.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing("path")` if `path` is empty.
    pub fn contains(&self, path: &[&str]) -> Result<bool> {
        Ok(self.resolve(path)?.is_some())
    }

    fn resolve(&self, path: &[&str]) -> Result<Option<&str>> {
        if path.is_empty() {
            return Err(Error::Argument(ArgumentError::Missing("path")));
        }
        match nested_name(path) {
            Some(key) => Ok(self.source.property(&key)),
            None => {
                // Longer than any key a table can hold.
                #[cfg(feature = "defmt")]
                defmt::trace!("path of {} segments exceeds key capacity", path.len());
                Ok(None)
            }
        }
    }
}

impl PropertyLoader<Properties> {
    /// Parse a single properties text.
    ///
    /// # Errors
    ///
    /// Returns a load error if the text is malformed.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(Properties::parse(text)?))
    }

    /// Read a single properties source (std only).
    ///
    /// # Errors
    ///
    /// Returns a load error naming `default_properties` if reading fails.
    #[cfg(feature = "std")]
    pub fn load<R: std::io::Read>(default_properties: R) -> Result<Self> {
        let properties = crate::properties::load_named(default_properties, "default_properties")?;
        Ok(Self::new(properties))
    }
}

impl PropertyLoader<Layered<Properties, Properties>> {
    /// Parse default properties and a profile that overrides them.
    ///
    /// # Errors
    ///
    /// Returns a load error if either text is malformed.
    pub fn parse_layered(default_text: &str, profile_text: &str) -> Result<Self> {
        let base = Properties::parse(default_text)?;
        let overrides = Properties::parse(profile_text)?;
        Ok(Self::new(Layered::new(base, overrides)))
    }

    /// Read default properties and a profile that overrides them (std only).
    ///
    /// # Errors
    ///
    /// Returns a load error naming `default_properties` or
    /// `profile_properties` if reading that source fails.
    #[cfg(feature = "std")]
    pub fn load_layered<D, P>(default_properties: D, profile_properties: P) -> Result<Self>
    where
        D: std::io::Read,
        P: std::io::Read,
    {
        let base = crate::properties::load_named(default_properties, "default_properties")?;
        let overrides = crate::properties::load_named(profile_properties, "profile_properties")?;
        Ok(Self::new(Layered::new(base, overrides)))
    }
}

fn parse_double(text: &str) -> Option<f64> {
    let text = text.trim();
    let unsigned = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    // `f64::from_str` also takes `inf` and `nan` in any case.
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic())
        && unsigned != "Infinity"
        && unsigned != "NaN"
    {
        return None;
    }
    text.parse().ok()
}

/// Join `path` into a flat key, or `None` if it cannot fit.
fn nested_name(path: &[&str]) -> Option<Key> {
    let mut key = Key::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            key.write_char(PATH_SEPARATOR).ok()?;
        }
        key.write_str(segment).ok()?;
    }
    Some(key)
}
