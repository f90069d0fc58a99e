//! Error types for multi-serial-dump
//!
//! Descriptor problems are reported as [`ConfigError`]; everything that can
//! stop a capture run is folded into [`Error`].

use std::io;
use thiserror::Error;

/// Malformed `--interface` descriptor text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Nothing (or only an alias) before the parameter separator.
    #[error("device name required.")]
    DeviceNameRequired,

    /// Device segment ends with `)` but has no opening `(`.
    #[error("alias begin not found: \"{0}\"")]
    AliasBeginNotFound(String),

    /// Parameter segment matched none of the accepted forms.
    #[error("unable to parse communication parameters: \"{0}\"")]
    UnparsableParameters(String),
}

/// Result type alias for capture operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure that ends a capture run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no interface defined")]
    NoInterfaces,

    #[error("unable to open \"{device}\": {source}")]
    DeviceOpen {
        device: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to set {option} on \"{device}\": {source}")]
    OptionSet {
        device: String,
        option: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("read from \"{device}\" failed: {source}")]
    Read {
        device: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to write dump: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    pub fn device_open(device: impl Into<String>, source: io::Error) -> Self {
        Self::DeviceOpen {
            device: device.into(),
            source,
        }
    }

    pub fn option_set(device: impl Into<String>, option: &'static str, source: io::Error) -> Self {
        Self::OptionSet {
            device: device.into(),
            option,
            source,
        }
    }

    pub fn read(device: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            device: device.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let error = Error::from(ConfigError::UnparsableParameters("99x1".to_string()));
        assert_eq!(
            error.to_string(),
            "unable to parse communication parameters: \"99x1\""
        );
    }

    #[test]
    fn test_device_errors_name_the_device() {
        let error = Error::device_open(
            "/dev/ttyUSB7",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        let msg = error.to_string();
        assert!(msg.contains("/dev/ttyUSB7"));
        assert!(msg.contains("No such file or directory"));

        let error = Error::option_set(
            "com1",
            "stop bits",
            io::Error::new(io::ErrorKind::Unsupported, "not supported"),
        );
        assert_eq!(
            error.to_string(),
            "unable to set stop bits on \"com1\": not supported"
        );
    }

    #[test]
    fn test_no_interfaces_message() {
        assert_eq!(Error::NoInterfaces.to_string(), "no interface defined");
    }
}
