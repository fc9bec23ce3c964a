//! Unit tests for typed property access.

use robo_properties::error::{ArgumentError, Error, ValueError};
use robo_properties::{property_enum, Properties, PropertyLoader};

property_enum! {
    enum TestEnum {
        ValueInEnum,
    }
}

fn loader(pairs: &[(&str, &str)]) -> PropertyLoader<Properties> {
    PropertyLoader::new(Properties::from_pairs(pairs).expect("Failed to build properties"))
}

/// Test that a nested path reads the dotted key.
#[test]
fn test_nested_path_reads_dotted_key() {
    let target = loader(&[("a.b", "5")]);
    assert_eq!(target.get_int(&["a", "b"]).unwrap(), Some(5));
    assert_eq!(target.get_string(&["a.b"]).unwrap(), Some("5"));
}

/// Test that a malformed integer fails while the raw string is still readable.
#[test]
fn test_malformed_int_still_readable_as_string() {
    let target = loader(&[("speed", "not-a-number")]);

    assert!(matches!(
        target.get_int(&["speed"]),
        Err(Error::Value(ValueError::InvalidInteger { .. }))
    ));
    assert_eq!(target.get_string(&["speed"]).unwrap(), Some("not-a-number"));
}

/// Test that a missing key is absent for every typed getter.
#[test]
fn test_missing_key_is_absent_everywhere() {
    let target = loader(&[("other", "1")]);
    let path = ["I don't exist"];

    assert_eq!(target.get_string(&path).unwrap(), None);
    assert_eq!(target.get_int(&path).unwrap(), None);
    assert_eq!(target.get_double(&path).unwrap(), None);
    assert_eq!(target.get_enum::<TestEnum>(&path).unwrap(), None);
}

/// Test that an empty path is a precondition error naming "path".
#[test]
fn test_empty_path_names_path() {
    let target = loader(&[]);
    let err = target.get_double(&[]).unwrap_err();

    assert_eq!(err, Error::Argument(ArgumentError::Missing("path")));
    assert!(err.to_string().contains("path"));
}

/// Test enum resolution against member names.
#[test]
fn test_enum_members() {
    let target = loader(&[("in", "ValueInEnum"), ("out", "NotInEnum")]);

    assert_eq!(
        target.get_enum::<TestEnum>(&["in"]).unwrap(),
        Some(TestEnum::ValueInEnum)
    );

    let err = target.get_enum::<TestEnum>(&["out"]).unwrap_err();
    assert!(matches!(err, Error::Value(ValueError::UnknownMember { .. })));
    assert!(err.to_string().contains("NotInEnum"));
}

/// Test that a malformed double reports the key and the raw value.
#[test]
fn test_malformed_double_message() {
    let target = loader(&[("drive.gain", "fast")]);
    let err = target.get_double(&["drive", "gain"]).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("drive.gain"));
    assert!(message.contains("fast"));
}
