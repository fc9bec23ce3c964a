//! # robo-properties
//!
//! Typed, layered access to robot configuration stored in properties files,
//! and construction of embedded-hal backed devices from it.
//!
//! ## Features
//!
//! - **Nested paths**: `get_int(&["drive", "left", "port"])` reads `drive.left.port`
//! - **Layered sources**: profile properties override defaults key by key
//! - **Absence is not an error**: missing keys read as `Ok(None)`, malformed
//!   values fail loudly
//! - **no_std compatible**: heap-backed tables with `alloc`, fixed-capacity
//!   `heapless` storage without it
//! - **Device loading**: speed controllers, servos, solenoids, relays,
//!   compressors and drive trains built over embedded-hal 1.0 traits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use robo_properties::{DeviceLoader, PropertyLoader};
//!
//! // Defaults overridden by a competition profile
//! let properties = PropertyLoader::load_layered(
//!     File::open("robot.properties")?,
//!     File::open("competition.properties")?,
//! )?;
//!
//! let speed = properties.get_double(&["drive", "maxSpeed"])?.unwrap_or(1.0);
//!
//! // Build the drive train through a board binding
//! let mut devices = DeviceLoader::new(&properties, board);
//! let mut drive = devices.load_drive_train(&["drive"])?;
//! drive.tank_drive(speed as f32, speed as f32)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables reading from `std::io::Read`, files, and TOML
//! - `alloc`: Heap-backed, unbounded property tables for no_std with an allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod error;
pub mod hardware;
pub mod loader;
pub mod properties;

// Re-exports for ergonomic API
pub use error::{Error, Result};
pub use hardware::{Device, DeviceLoader, HardwareBinding};
pub use loader::{PropertyEnum, PropertyLoader, PATH_SEPARATOR};
pub use properties::{Layered, Properties, PropertySource};

// Loading from files (std only)
#[cfg(feature = "std")]
pub use properties::load_properties;
