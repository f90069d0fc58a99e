//! Multi Serial Dump
//!
//! Reads from any number of serial interfaces at once and prints everything
//! that arrives as a hex+ASCII dump tagged with the interface alias.
//!
//! - [`interface`]: parse `--interface` descriptors
//! - [`serial`]: open ports and run the capture loop
//! - [`dump`]: render received bytes

pub mod dump;
pub mod error;
pub mod interface;
pub mod serial;

pub use error::{ConfigError, Error, Result};
