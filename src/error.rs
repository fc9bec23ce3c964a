//! Error types for robo-properties.
//!
//! Absence of a property is never an error: typed getters report it as
//! `Ok(None)`. The variants below cover precondition violations, malformed
//! values, source loading, and device construction.

use core::fmt::{self, Write};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Bounded text carried by errors (keys, raw values, messages).
pub type ErrorText = heapless::String<64>;

/// Unified error type for all robo-properties operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A required argument was missing or unusable
    Argument(ArgumentError),
    /// A present value could not be converted to the requested type
    Value(ValueError),
    /// A property source could not be read or parsed
    Load(LoadError),
    /// A device could not be built from its properties
    Device(DeviceError),
}

/// Precondition violations.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// Named parameter was empty where at least one element is required
    Missing(&'static str),
    /// Path has more segments than a device lookup can extend
    PathTooDeep(usize),
}

/// Conversion failures on present values.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Value is not a decimal 32-bit integer
    InvalidInteger {
        /// Joined property key
        key: ErrorText,
        /// Raw property value
        value: ErrorText,
    },
    /// Value is not a decimal floating point number
    InvalidFloat {
        /// Joined property key
        key: ErrorText,
        /// Raw property value
        value: ErrorText,
    },
    /// Value does not name a member of the requested enum
    UnknownMember {
        /// Joined property key
        key: ErrorText,
        /// Raw property value
        value: ErrorText,
    },
}

/// Property source loading errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// `\u` escape without four hex digits, or an unpaired surrogate
    MalformedEscape {
        /// 1-based line where the logical line starts
        line: usize,
    },
    /// Key longer than [`MAX_KEY_LEN`](crate::properties::MAX_KEY_LEN) (without `alloc`)
    KeyTooLong {
        /// 1-based line where the logical line starts
        line: usize,
    },
    /// Value longer than [`MAX_VALUE_LEN`](crate::properties::MAX_VALUE_LEN) (without `alloc`)
    ValueTooLong {
        /// 1-based line where the logical line starts
        line: usize,
    },
    /// Logical line continued over too many natural lines (without `alloc`)
    LineTooLong {
        /// 1-based line where the logical line starts
        line: usize,
    },
    /// Table already holds [`MAX_PROPERTIES`](crate::properties::MAX_PROPERTIES) entries (without `alloc`)
    CapacityExceeded,
    /// Reading a source failed (std only)
    #[cfg(feature = "std")]
    Source {
        /// Name of the source parameter that failed
        parameter: &'static str,
        /// Underlying error message
        message: heapless::String<128>,
    },
    /// Failed to parse TOML input (std only)
    #[cfg(feature = "std")]
    ParseError(heapless::String<128>),
}

/// Device construction and actuation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// Discriminator value does not name a supported device variant
    UnsupportedVariant {
        /// Joined property key of the discriminator
        key: ErrorText,
        /// Raw discriminator value
        value: ErrorText,
    },
    /// Required device field is not set
    MissingField {
        /// Joined property key
        key: ErrorText,
    },
    /// Integer field is outside the range of a channel number
    InvalidChannel {
        /// Joined property key
        key: ErrorText,
        /// Parsed value
        value: i32,
    },
    /// The hardware binding cannot provide the requested channel
    ChannelUnavailable {
        /// Requested port or channel
        port: u8,
    },
    /// Relay value needs a line the relay direction does not enable
    DirectionNotAllowed,
    /// PWM or GPIO operation failed
    PinError,
}

/// Copy `text` into an [`ErrorText`], truncating at a char boundary.
pub(crate) fn error_text(text: &str) -> ErrorText {
    let mut out = ErrorText::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Join path segments into an [`ErrorText`] for diagnostics.
pub(crate) fn joined_text(path: &[&str]) -> ErrorText {
    let mut out = ErrorText::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            let _ = out.write_char('.');
        }
        for c in segment.chars() {
            if out.push(c).is_err() {
                return out;
            }
        }
    }
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Argument(e) => write!(f, "Invalid argument: {}", e),
            Error::Value(e) => write!(f, "Invalid value: {}", e),
            Error::Load(e) => write!(f, "Load error: {}", e),
            Error::Device(e) => write!(f, "Device error: {}", e),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::Missing(name) => write!(f, "{} cannot be empty", name),
            ArgumentError::PathTooDeep(depth) => {
                write!(f, "path of {} segments is too deep to extend", depth)
            }
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::InvalidInteger { key, value } => {
                write!(f, "'{}' = '{}' is not an integer", key, value)
            }
            ValueError::InvalidFloat { key, value } => {
                write!(f, "'{}' = '{}' is not a number", key, value)
            }
            ValueError::UnknownMember { key, value } => {
                write!(f, "'{}' = '{}' does not name a known member", key, value)
            }
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MalformedEscape { line } => {
                write!(f, "Malformed \\uxxxx escape on line {}", line)
            }
            LoadError::KeyTooLong { line } => write!(f, "Key too long on line {}", line),
            LoadError::ValueTooLong { line } => write!(f, "Value too long on line {}", line),
            LoadError::LineTooLong { line } => {
                write!(f, "Too many continuation lines starting at line {}", line)
            }
            LoadError::CapacityExceeded => write!(f, "Property table is full"),
            #[cfg(feature = "std")]
            LoadError::Source { parameter, message } => {
                write!(f, "Cannot read {}: {}", parameter, message)
            }
            #[cfg(feature = "std")]
            LoadError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::UnsupportedVariant { key, value } => {
                write!(f, "Unsupported variant '{}' for '{}'", value, key)
            }
            DeviceError::MissingField { key } => write!(f, "Required field '{}' is not set", key),
            DeviceError::InvalidChannel { key, value } => {
                write!(f, "'{}' = {} is not a valid channel", key, value)
            }
            DeviceError::ChannelUnavailable { port } => {
                write!(f, "Channel {} is not available", port)
            }
            DeviceError::DirectionNotAllowed => {
                write!(f, "Relay direction does not allow this value")
            }
            DeviceError::PinError => write!(f, "PWM or GPIO operation failed"),
        }
    }
}

// Conversion impls
impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Error::Argument(e)
    }
}

impl From<ValueError> for Error {
    fn from(e: ValueError) -> Self {
        Error::Value(e)
    }
}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        Error::Load(e)
    }
}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Error::Device(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ArgumentError {}

#[cfg(feature = "std")]
impl std::error::Error for ValueError {}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}

#[cfg(feature = "std")]
impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_names_parameter() {
        let err = Error::from(ArgumentError::Missing("path"));
        let mut buf = heapless::String::<64>::new();
        write!(buf, "{}", err).unwrap();
        assert!(buf.contains("path"));
    }

    #[test]
    fn test_error_text_truncates() {
        let long = "x".repeat(100);
        assert_eq!(error_text(&long).len(), 64);
    }

    #[test]
    fn test_joined_text() {
        assert_eq!(joined_text(&["drive", "left", "port"]).as_str(), "drive.left.port");
    }
}
