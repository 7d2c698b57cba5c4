//! Line terminators and single-line reading.
//!
//! Reading and writing lines are governed by two small enumerations:
//! - [`Eol`] is the terminator appended when a line is written
//! - [`LinePolicy`] decides how terminators are recognized when reading
//!
//! Line reading works one byte at a time over any `std::io::Read`, which is
//! acceptable for a convenience library and keeps the state machines trivial.

use std::io::{self, Read};

/// A line terminator appended when writing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eol {
    /// Line Feed (Unix/Linux/macOS) - \n
    Lf,
    /// Carriage Return + Line Feed (Windows) - \r\n
    CrLf,
    /// Carriage Return (old macOS) - \r
    Cr,
}

impl Eol {
    /// The terminator written by default on this platform.
    pub const NATIVE: Eol = if cfg!(windows) { Eol::CrLf } else { Eol::Lf };

    /// The terminator as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
            Eol::Cr => "\r",
        }
    }

    /// The terminator as raw bytes.
    pub fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

/// How line terminators are recognized when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePolicy {
    /// A line ends at a single `\n`; `\r` is ordinary content.
    Unix,
    /// A line ends at `\r\n`; a bare `\n` and a `\r` not followed by `\n`
    /// are ordinary content.
    Windows,
}

impl LinePolicy {
    /// The policy used by default on this platform.
    pub const NATIVE: LinePolicy = if cfg!(windows) {
        LinePolicy::Windows
    } else {
        LinePolicy::Unix
    };
}

/// Read one line under `policy` into `line` (cleared first, terminator
/// excluded). Returns `Ok(false)` only when the stream produced no bytes.
pub(crate) fn read_line_from<R: Read>(
    reader: &mut R,
    policy: LinePolicy,
    line: &mut Vec<u8>,
) -> io::Result<bool> {
    match policy {
        LinePolicy::Unix => read_line_unix(reader, line),
        LinePolicy::Windows => read_line_windows(reader, line),
    }
}

/// Read a single byte, retrying on interruption. `None` means end-of-stream.
fn read_byte<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn read_line_unix<R: Read>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    loop {
        match read_byte(reader)? {
            None => return Ok(!line.is_empty()),
            Some(b'\n') => return Ok(true),
            Some(byte) => line.push(byte),
        }
    }
}

fn read_line_windows<R: Read>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    // One byte of lookahead: a \r is held back until the next byte decides
    // whether it was half of a \r\n terminator or ordinary content.
    let mut pending_cr = false;
    loop {
        match read_byte(reader)? {
            None => {
                if pending_cr {
                    // A \r as the very last byte belongs to the final line.
                    line.push(b'\r');
                    return Ok(true);
                }
                return Ok(!line.is_empty());
            }
            Some(b'\n') => {
                if pending_cr {
                    return Ok(true);
                }
                line.push(b'\n');
            }
            Some(byte) => {
                if pending_cr {
                    line.push(b'\r');
                    pending_cr = false;
                }
                if byte == b'\r' {
                    pending_cr = true;
                } else {
                    line.push(byte);
                }
            }
        }
    }
}
