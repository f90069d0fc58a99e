//! Dump formatting
//!
//! Renders captured bytes as alias-tagged hex+ASCII lines.

pub mod hex_dump;

pub use hex_dump::{HexDump, PAGE_WIDTH};
