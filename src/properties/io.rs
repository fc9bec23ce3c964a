//! Loading property tables from readers and files (std only).

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, LoadError, Result};

use super::Properties;

impl Properties {
    /// Read and parse properties-file text from `reader`.
    ///
    /// The reader is consumed to the end once. Its content must be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns a load error if reading fails or the text is malformed.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        load_named(reader, "properties")
    }

    /// Parse TOML text, flattening nested tables into dotted keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a capacity is exceeded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use robo_properties::Properties;
    ///
    /// let props = Properties::from_toml_str("[drive.left]\nport = 1\n").unwrap();
    /// assert_eq!(props.get("drive.left.port"), Some("1"));
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            let msg = heapless::String::try_from(e.message()).unwrap_or_default();
            Error::Load(LoadError::ParseError(msg))
        })
    }
}

/// Load a properties file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use robo_properties::load_properties;
///
/// let props = load_properties("robot.properties")?;
/// ```
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Properties> {
    let file = fs::File::open(path.as_ref()).map_err(|e| source_error("path", &e))?;
    load_named(file, "path")
}

/// Read a whole source, attributing failures to `parameter`.
pub(crate) fn load_named<R: Read>(mut reader: R, parameter: &'static str) -> Result<Properties> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| source_error(parameter, &e))?;
    Properties::parse(&content)
}

fn source_error(parameter: &'static str, e: &std::io::Error) -> Error {
    let mut message = heapless::String::<128>::new();
    for c in e.to_string().chars() {
        if message.push(c).is_err() {
            break;
        }
    }
    Error::Load(LoadError::Source { parameter, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let text = b"drive.left.port=1\ndrive.right.port=2\n";
        let props = Properties::load(&text[..]).unwrap();
        assert_eq!(props.get("drive.right.port"), Some("2"));
    }

    #[test]
    fn test_invalid_utf8_names_parameter() {
        let bytes: &[u8] = &[0x6b, 0x3d, 0xff, 0xfe];
        let result = load_named(bytes, "profile_properties");
        assert!(matches!(
            result,
            Err(Error::Load(LoadError::Source { parameter: "profile_properties", .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_properties("/nonexistent/robot.properties");
        assert!(matches!(
            result,
            Err(Error::Load(LoadError::Source { parameter: "path", .. }))
        ));
    }

    #[test]
    fn test_toml_parse_error() {
        let result = Properties::from_toml_str("not = [valid");
        assert!(matches!(result, Err(Error::Load(LoadError::ParseError(_)))));
    }
}
