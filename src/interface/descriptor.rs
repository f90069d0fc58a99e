//! Interface descriptor parsing
//!
//! Syntax: `<device>[(<alias>)][:<parameters>]`, see [`LineSettings`] for the
//! parameter forms.

use super::settings::LineSettings;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// One `--interface` argument, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    device: String,
    alias: String,
    settings: LineSettings,
}

impl InterfaceDescriptor {
    /// Parse a descriptor string
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        text.parse()
    }

    /// Path or name of the serial device
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Label printed in front of every dump line
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn settings(&self) -> &LineSettings {
        &self.settings
    }
}

impl FromStr for InterfaceDescriptor {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim_start();

        let (segment, params) = match text.split_once(':') {
            Some((segment, params)) => (segment, Some(params)),
            None => (text, None),
        };

        if segment.is_empty() {
            return Err(ConfigError::DeviceNameRequired);
        }

        let (device, alias) = split_alias(segment)?;
        if device.is_empty() {
            return Err(ConfigError::DeviceNameRequired);
        }

        let settings = match params {
            Some(params) => LineSettings::parse_params(params)?,
            None => LineSettings::default(),
        };

        let alias = match alias {
            Some(alias) if !alias.is_empty() => alias,
            _ => device,
        };

        Ok(Self {
            device: device.to_string(),
            alias: alias.to_string(),
            settings,
        })
    }
}

/// Split `name(alias)` into its parts; the alias is taken from the last `(`
fn split_alias(segment: &str) -> Result<(&str, Option<&str>), ConfigError> {
    let Some(inner) = segment.strip_suffix(')') else {
        return Ok((segment, None));
    };

    let begin = inner
        .rfind('(')
        .ok_or_else(|| ConfigError::AliasBeginNotFound(segment.to_string()))?;

    Ok((&inner[..begin], Some(&inner[begin + 1..])))
}

impl fmt::Display for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.device)?;
        if self.alias != self.device {
            write!(f, "({})", self.alias)?;
        }
        write!(f, ":{}", self.settings)
    }
}
