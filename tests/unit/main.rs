//! Unit test harness for robo-properties.
//!
//! This module organizes unit tests for each component of the library.

mod property_loader;
mod property_sources;
