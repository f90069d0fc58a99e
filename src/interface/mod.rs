//! Interface descriptors
//!
//! Turns `--interface` arguments such as `com2(alt):9600,8n1` into typed
//! device names, aliases and line settings.

pub mod descriptor;
pub mod settings;

pub use descriptor::InterfaceDescriptor;
pub use settings::{CharSize, LineSettings, Parity, StopBits};
