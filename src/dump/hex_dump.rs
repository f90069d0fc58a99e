//! Hex + ASCII rendering of captured bytes
//!
//! Every line holds up to [`PAGE_WIDTH`] bytes:
//!
//! ```text
//! com1: 48 65 6c 6c 6f 0d 0a                            Hello..
//! ```
//!
//! The hex column is always padded to the full page width so the ASCII
//! column lines up across interfaces.

use std::fmt::Write as _;
use std::io::{self, Write};

/// Bytes rendered per output line
pub const PAGE_WIDTH: usize = 16;

/// Padding for an unused byte slot, as wide as `"xx "`
const HEX_CELL: &str = "   ";

/// Writes dumps to a shared output sink
pub struct HexDump<W: Write> {
    output: W,
}

impl<W: Write> HexDump<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Write the complete rendering of `bytes` and flush it
    ///
    /// The block goes out in a single `write_all`, so nothing else written to
    /// the same sink can land between its lines.
    pub fn dump(&mut self, alias: &str, bytes: &[u8]) -> io::Result<()> {
        let block = render(alias, bytes);
        self.output.write_all(block.as_bytes())?;
        self.output.flush()
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.output
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.output
    }
}

/// Render `bytes` as paginated lines prefixed with `alias`
///
/// An empty slice still yields one (empty, fully padded) line.
pub fn render(alias: &str, bytes: &[u8]) -> String {
    let lines = bytes.len().div_ceil(PAGE_WIDTH).max(1);
    let mut output = String::with_capacity(lines * (alias.len() + 2 + PAGE_WIDTH * 4 + 1));

    if bytes.is_empty() {
        render_line(&mut output, alias, &[]);
    }
    for line in bytes.chunks(PAGE_WIDTH) {
        render_line(&mut output, alias, line);
    }

    output
}

fn render_line(output: &mut String, alias: &str, line: &[u8]) {
    output.push_str(alias);
    output.push_str(": ");

    for byte in line {
        // writing into a String cannot fail
        let _ = write!(output, "{:02x} ", byte);
    }
    for _ in line.len()..PAGE_WIDTH {
        output.push_str(HEX_CELL);
    }

    output.extend(line.iter().map(|&byte| as_printable(byte)));
    output.push('\n');
}

fn as_printable(byte: u8) -> char {
    if byte > 31 && byte < 127 {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_COLUMN: usize = PAGE_WIDTH * 3;

    #[test]
    fn test_empty_dump_is_one_padded_line() {
        let text = render("com1", &[]);
        assert_eq!(text, format!("com1: {}\n", " ".repeat(HEX_COLUMN)));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_full_line_has_no_padding() {
        let bytes: Vec<u8> = (b'A'..b'A' + 16).collect();
        let text = render("x", &bytes);
        assert_eq!(
            text,
            "x: 41 42 43 44 45 46 47 48 49 4a 4b 4c 4d 4e 4f 50 ABCDEFGHIJKLMNOP\n"
        );
    }

    #[test]
    fn test_seventeen_bytes_wrap() {
        let bytes = [0x30u8; 17];
        let text = render("com1", &bytes);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("com1: {}{}", "30 ".repeat(16), "0".repeat(16)));
        assert_eq!(lines[1], format!("com1: 30 {}0", " ".repeat(45)));
    }

    #[test]
    fn test_non_printable_bytes() {
        let text = render("a", &[0x00, 0x1f, b' ', b'!', b'~', 0x7f, 0xff, b'\n']);
        assert!(text.starts_with("a: 00 1f 20 21 7e 7f ff 0a "));
        assert!(text.ends_with(".. !~...\n"));
    }

    #[test]
    fn test_lowercase_hex() {
        let text = render("a", &[0xab, 0xcd]);
        assert!(text.starts_with("a: ab cd "));
    }

    #[test]
    fn test_every_line_has_fixed_hex_width() {
        let bytes: Vec<u8> = (0u8..40).collect();
        for line in render("port", &bytes).lines() {
            let body = line.strip_prefix("port: ").unwrap();
            let ascii = &body[HEX_COLUMN..];
            assert!(ascii.len() <= PAGE_WIDTH);
            assert!(ascii.chars().all(|c| c == '.' || c.is_ascii_graphic() || c == ' '));
        }
    }

    #[test]
    fn test_every_byte_value_renders_as_two_hex_digits() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = render("all", &bytes);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);

        for (row, line) in lines.iter().enumerate() {
            let hex = &line["all: ".len().."all: ".len() + HEX_COLUMN];
            let expected: String = (0..PAGE_WIDTH)
                .map(|col| format!("{:02x} ", row * PAGE_WIDTH + col))
                .collect();
            assert_eq!(hex, expected);
        }
    }

    #[test]
    fn test_dump_writes_whole_block() {
        let mut dump = HexDump::new(Vec::new());
        dump.dump("com1", b"0123456789abcdefXYZ").unwrap();
        dump.dump("com2", b"").unwrap();

        let text = String::from_utf8(dump.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("com1: 30 31"));
        assert!(lines[1].ends_with("XYZ"));
        assert!(lines[2].starts_with("com2: "));
    }
}
