//! Serial port capture
//!
//! This module provides functionality for:
//! - Opening and configuring one port per interface descriptor
//! - Keeping a read pending on every open port and dumping what arrives

pub mod monitor;
pub mod port;

pub use monitor::{run_monitor, SerialMonitor};
pub use port::{open, open_all, PortOption, PortSession, SerialIo, TokioSerialIo};
