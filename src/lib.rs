//! # tinyfile - Tiny file utilities
//!
//! Convenience wrappers around whole-file I/O plus an owned file handle
//! whose read/write capability is enforced at compile time.
//!
//! Modules:
//! - `mode` for the six open modes and their capability markers
//! - `eol` for line terminators and line-recognition policies
//! - `handle` for the capability-typed [`Handle`] and its line helpers
//! - `file` for whole-file read/write/size and bulk line operations
//!
//! A handle opened read-only simply has no write methods:
//!
//! ```no_run
//! use tinyfile::{Reader, Appender};
//!
//! # fn main() -> Result<(), tinyfile::Error> {
//! let mut reader = Reader::open("notes.txt")?;
//! let mut line = String::new();
//! while reader.read_line(&mut line)? {
//!     // Process the line here.
//! }
//!
//! // reader.write(b"hello"); // Does not compile.
//!
//! Appender::open("notes.txt")?.write_line("a new line")?;
//! # Ok(())
//! # }
//! ```

mod eol;
mod file;
mod handle;
pub mod mode;

pub use eol::{Eol, LinePolicy};
pub use file::{for_each_line, read, read_lines, size, write, write_lines};
pub use handle::{
    Appender, Handle, Lines, Reader, ReaderAppender, ReaderWriter, TruncateReaderWriter, Writer,
};
pub use mode::{CanRead, CanWrite, Mode, OpenMode};

use std::io;
use std::path::PathBuf;

/// Errors that can occur during file operations.
///
/// Partial reads and writes are not errors; they are reported through the
/// byte counts the operations return.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be opened (or probed) in the requested mode.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An I/O operation on an already-open handle failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, Error>;
