//! Deserialize a [`Properties`] table from any nested map.
//!
//! Nested tables become dotted keys and scalars are stored in their textual
//! form, so `{ drive = { left = { port = 1 } } }` yields `drive.left.port=1`.
//! Sequence elements are keyed by index (`wheels.0`, `wheels.1`, ...).

use core::fmt::{self, Display, Write};

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use super::{Key, Properties, Value};

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut properties = Properties::new();
        deserializer.deserialize_map(Flatten {
            prefix: Key::new(),
            out: &mut properties,
        })?;
        Ok(properties)
    }
}

/// Writes every leaf under `prefix` into `out`.
struct Flatten<'a> {
    prefix: Key,
    out: &'a mut Properties,
}

impl Flatten<'_> {
    fn child<E: de::Error>(&self, name: impl Display) -> Result<Key, E> {
        let mut key = self.prefix.clone();
        if !key.is_empty() {
            key.write_char('.')
                .map_err(|_| E::custom("property key too long"))?;
        }
        write!(key, "{}", name).map_err(|_| E::custom("property key too long"))?;
        Ok(key)
    }

    fn leaf<E: de::Error>(self, value: impl Display) -> Result<(), E> {
        let mut text = Value::new();
        write!(text, "{}", value).map_err(|_| E::custom("property value too long"))?;
        if self.prefix.is_empty() {
            return Err(E::custom("expected a table of properties"));
        }
        self.out
            .insert_owned(self.prefix, text)
            .map(|_| ())
            .map_err(E::custom)
    }
}

impl<'de> DeserializeSeed<'de> for Flatten<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Flatten<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of scalar properties")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<(), E> {
        self.leaf(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<(), E> {
        self.leaf(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<(), E> {
        self.leaf(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<(), E> {
        self.leaf(v)
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<(), E> {
        self.leaf(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.leaf(v)
    }

    fn visit_map<A>(mut self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        while let Some(name) = map.next_key::<Key>()? {
            let prefix = self.child(&name)?;
            map.next_value_seed(Flatten {
                prefix,
                out: &mut *self.out,
            })?;
        }
        Ok(())
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut index = 0usize;
        loop {
            let prefix = self.child(index)?;
            let seed = Flatten {
                prefix,
                out: &mut *self.out,
            };
            if seq.next_element_seed(seed)?.is_none() {
                return Ok(());
            }
            index += 1;
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_tables() {
        let toml = r#"
[drive]
numWheels = 2

[drive.left]
type = "Talon"
port = 1

[drive.right]
type = "Victor"
port = 2
"#;
        let props: Properties = toml::from_str(toml).unwrap();

        assert_eq!(props.get("drive.numWheels"), Some("2"));
        assert_eq!(props.get("drive.left.type"), Some("Talon"));
        assert_eq!(props.get("drive.right.port"), Some("2"));
    }

    #[test]
    fn test_flatten_scalars_and_arrays() {
        let toml = r#"
enabled = true
gain = 0.5
ports = [3, 4]
"#;
        let props: Properties = toml::from_str(toml).unwrap();

        assert_eq!(props.get("enabled"), Some("true"));
        assert_eq!(props.get("gain"), Some("0.5"));
        assert_eq!(props.get("ports.0"), Some("3"));
        assert_eq!(props.get("ports.1"), Some("4"));
        assert_eq!(props.get("ports.2"), None);
    }
}
