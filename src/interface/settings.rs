//! Communication parameters of one interface
//!
//! Parameter text comes in three shapes, tried in this order:
//!
//! - `<baud>` e.g. `19200`
//! - `<baud>,<bits><parity><stop>` e.g. `14400,8n1`
//! - `<bits><parity><stop>` e.g. `7e1.5`
//!
//! Each shape has to match the whole text. Whatever a shape leaves out keeps
//! its default.

use crate::error::ConfigError;
use std::fmt;

/// Baud rate used when the descriptor does not name one
pub const DEFAULT_BAUD_RATE: u32 = 9800;

/// Character size used when the descriptor does not name one
pub const DEFAULT_CHAR_SIZE: CharSize = CharSize::Eight;

/// Parity used when the descriptor does not name one
pub const DEFAULT_PARITY: Parity = Parity::None;

/// Stop bits used when the descriptor does not name them
pub const DEFAULT_STOP_BITS: StopBits = StopBits::One;

/// Data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSize {
    Seven,
    Eight,
}

impl CharSize {
    /// Number of data bits
    pub fn bits(self) -> u8 {
        match self {
            CharSize::Seven => 7,
            CharSize::Eight => 8,
        }
    }

    fn from_token(token: char) -> Option<Self> {
        match token {
            '7' => Some(CharSize::Seven),
            '8' => Some(CharSize::Eight),
            _ => None,
        }
    }
}

impl fmt::Display for CharSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl Parity {
    fn from_token(token: char) -> Option<Self> {
        match token {
            'n' | 'N' => Some(Parity::None),
            'o' | 'O' => Some(Parity::Odd),
            'e' | 'E' => Some(Parity::Even),
            _ => None,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::None => write!(f, "n"),
            Parity::Odd => write!(f, "o"),
            Parity::Even => write!(f, "e"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    OnePointFive,
    Two,
}

impl StopBits {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(StopBits::One),
            "1.5" => Some(StopBits::OnePointFive),
            "2" => Some(StopBits::Two),
            _ => None,
        }
    }
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopBits::One => write!(f, "1"),
            StopBits::OnePointFive => write!(f, "1.5"),
            StopBits::Two => write!(f, "2"),
        }
    }
}

/// Line settings applied to a serial port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSettings {
    pub baud_rate: u32,
    pub char_size: CharSize,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            char_size: DEFAULT_CHAR_SIZE,
            parity: DEFAULT_PARITY,
            stop_bits: DEFAULT_STOP_BITS,
        }
    }
}

impl LineSettings {
    /// Parse the text following the `:` of a descriptor
    pub fn parse_params(text: &str) -> Result<Self, ConfigError> {
        if let Some(baud_rate) = parse_baud(text) {
            return Ok(Self {
                baud_rate,
                ..Default::default()
            });
        }

        if let Some((baud, char_config)) = text.split_once(',') {
            if let (Some(baud_rate), Some((char_size, parity, stop_bits))) =
                (parse_baud(baud), parse_char_config(char_config))
            {
                return Ok(Self {
                    baud_rate,
                    char_size,
                    parity,
                    stop_bits,
                });
            }
        }

        if let Some((char_size, parity, stop_bits)) = parse_char_config(text) {
            return Ok(Self {
                char_size,
                parity,
                stop_bits,
                ..Default::default()
            });
        }

        Err(ConfigError::UnparsableParameters(text.to_string()))
    }
}

impl fmt::Display for LineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}{}{}",
            self.baud_rate, self.char_size, self.parity, self.stop_bits
        )
    }
}

/// Digits only, non-zero and within `u32`
fn parse_baud(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok().filter(|&baud| baud > 0)
}

/// `<bits><parity><stop>` covering the whole text
fn parse_char_config(text: &str) -> Option<(CharSize, Parity, StopBits)> {
    let mut chars = text.chars();
    let char_size = CharSize::from_token(chars.next()?)?;
    let parity = Parity::from_token(chars.next()?)?;
    let stop_bits = StopBits::from_token(chars.as_str())?;
    Some((char_size, parity, stop_bits))
}
