//! Unit tests for property sources and layering.

use std::collections::{BTreeMap, HashMap};

use robo_properties::error::{Error, LoadError};
use robo_properties::{Layered, Properties, PropertyLoader, PropertySource};

/// Test that an empty override layer falls through to the base.
#[test]
fn test_empty_override_falls_through() {
    let base = Properties::from_pairs(&[("x", "1")]).unwrap();
    let layered = Layered::new(base, Properties::new());
    assert_eq!(layered.property("x"), Some("1"));
}

/// Test that an override replaces the base value.
#[test]
fn test_override_replaces_base() {
    let base = Properties::from_pairs(&[("x", "1")]).unwrap();
    let overrides = Properties::from_pairs(&[("x", "2")]).unwrap();
    let layered = Layered::new(base, overrides);
    assert_eq!(layered.property("x"), Some("2"));
}

/// Test that layers compose more than two deep.
#[test]
fn test_nested_layers() {
    let defaults = Properties::from_pairs(&[("a", "defaults"), ("b", "defaults"), ("c", "defaults")]).unwrap();
    let robot = Properties::from_pairs(&[("b", "robot"), ("c", "robot")]).unwrap();
    let event = Properties::from_pairs(&[("c", "event")]).unwrap();

    let target = PropertyLoader::new(Layered::new(Layered::new(&defaults, &robot), &event));

    assert_eq!(target.get_string(&["a"]).unwrap(), Some("defaults"));
    assert_eq!(target.get_string(&["b"]).unwrap(), Some("robot"));
    assert_eq!(target.get_string(&["c"]).unwrap(), Some("event"));
}

/// Test parsing text with a default and a profile layer.
#[test]
fn test_parse_layered_profile() {
    let defaults = "\
# Shared defaults
drive.numWheels = 2
drive.left.port = 1
drive.right.port = 2
";
    let profile = "\
! Practice robot wiring
drive.right.port = 4
";
    let target = PropertyLoader::parse_layered(defaults, profile).unwrap();

    assert_eq!(target.get_int(&["drive", "numWheels"]).unwrap(), Some(2));
    assert_eq!(target.get_int(&["drive", "left", "port"]).unwrap(), Some(1));
    assert_eq!(target.get_int(&["drive", "right", "port"]).unwrap(), Some(4));
}

/// Test that reader failures name the layer that failed.
#[test]
fn test_load_layered_names_failing_source() {
    let defaults: &[u8] = b"x=1\n";
    let profile: &[u8] = &[0xff, 0xfe];

    let result = PropertyLoader::load_layered(defaults, profile);
    assert!(matches!(
        result,
        Err(Error::Load(LoadError::Source { parameter: "profile_properties", .. }))
    ));
}

/// Test standard maps as pre-built sources.
#[test]
fn test_std_maps_as_sources() {
    let mut hash = HashMap::new();
    hash.insert("arm.port".to_string(), "3".to_string());
    let target = PropertyLoader::new(&hash);
    assert_eq!(target.get_int(&["arm", "port"]).unwrap(), Some(3));

    let mut tree = BTreeMap::new();
    tree.insert("arm.port".to_string(), "5".to_string());
    let target = PropertyLoader::new(Layered::new(hash, tree));
    assert_eq!(target.get_int(&["arm", "port"]).unwrap(), Some(5));
}

/// Test TOML input flattened into dotted keys.
#[test]
fn test_toml_source() {
    let toml = r#"
[drive]
numWheels = 4

[drive.frontLeft]
type = "Jaguar"
port = 0
"#;
    let target = PropertyLoader::new(Properties::from_toml_str(toml).unwrap());

    assert_eq!(target.get_int(&["drive", "numWheels"]).unwrap(), Some(4));
    assert_eq!(target.get_string(&["drive", "frontLeft", "type"]).unwrap(), Some("Jaguar"));
}
