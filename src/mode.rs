//! Open modes and the capability markers derived from them.

use std::fs::OpenOptions;

/// The six ways a file can be opened, mirroring the classic `fopen` modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Read-only, positioned at the start ("r").
    Read,
    /// Read-write, positioned at the start, no truncation ("r+").
    ReadWrite,
    /// Write-only, truncated to empty, created if missing ("w").
    Write,
    /// Read-write, truncated to empty, created if missing ("w+").
    Truncate,
    /// Write-only, positioned at the end, created if missing ("a").
    Append,
    /// Read-write, positioned at the end, created if missing ("a+").
    ReadAppend,
}

impl Mode {
    /// Whether handles opened in this mode may read.
    pub fn can_read(self) -> bool {
        !matches!(self, Mode::Write | Mode::Append)
    }

    /// Whether handles opened in this mode may write.
    pub fn can_write(self) -> bool {
        !matches!(self, Mode::Read)
    }

    /// Whether opening in this mode empties an existing file.
    pub fn truncates(self) -> bool {
        matches!(self, Mode::Write | Mode::Truncate)
    }

    /// Whether this mode starts positioned at the end of the file.
    pub fn appends(self) -> bool {
        matches!(self, Mode::Append | Mode::ReadAppend)
    }

    /// Whether opening in this mode creates the file if it is missing.
    pub fn creates(self) -> bool {
        !matches!(self, Mode::Read | Mode::ReadWrite)
    }

    /// Map this mode onto `OpenOptions`. Pure; no global mode tables.
    pub(crate) fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Mode::Read => {
                options.read(true);
            }
            Mode::ReadWrite => {
                options.read(true).write(true);
            }
            Mode::Write => {
                options.write(true).create(true).truncate(true);
            }
            Mode::Truncate => {
                options.read(true).write(true).create(true).truncate(true);
            }
            Mode::Append => {
                options.append(true).create(true);
            }
            Mode::ReadAppend => {
                options.read(true).append(true).create(true);
            }
        }
        options
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Compile-time counterpart of [`Mode`]. Implemented only by the six unit
/// marker types in this module; the trait is sealed.
pub trait OpenMode: sealed::Sealed {
    /// The runtime mode this marker stands for.
    const MODE: Mode;
}

/// Marker trait for modes whose handles may read.
pub trait CanRead: OpenMode {}

/// Marker trait for modes whose handles may write.
pub trait CanWrite: OpenMode {}

/// Marker for [`Mode::Read`].
#[derive(Debug, Clone, Copy)]
pub struct Read;

/// Marker for [`Mode::ReadWrite`].
#[derive(Debug, Clone, Copy)]
pub struct ReadWrite;

/// Marker for [`Mode::Write`].
#[derive(Debug, Clone, Copy)]
pub struct Write;

/// Marker for [`Mode::Truncate`].
#[derive(Debug, Clone, Copy)]
pub struct Truncate;

/// Marker for [`Mode::Append`].
#[derive(Debug, Clone, Copy)]
pub struct Append;

/// Marker for [`Mode::ReadAppend`].
#[derive(Debug, Clone, Copy)]
pub struct ReadAppend;

impl sealed::Sealed for Read {}
impl sealed::Sealed for ReadWrite {}
impl sealed::Sealed for Write {}
impl sealed::Sealed for Truncate {}
impl sealed::Sealed for Append {}
impl sealed::Sealed for ReadAppend {}

impl OpenMode for Read {
    const MODE: Mode = Mode::Read;
}

impl OpenMode for ReadWrite {
    const MODE: Mode = Mode::ReadWrite;
}

impl OpenMode for Write {
    const MODE: Mode = Mode::Write;
}

impl OpenMode for Truncate {
    const MODE: Mode = Mode::Truncate;
}

impl OpenMode for Append {
    const MODE: Mode = Mode::Append;
}

impl OpenMode for ReadAppend {
    const MODE: Mode = Mode::ReadAppend;
}

impl CanRead for Read {}
impl CanRead for ReadWrite {}
impl CanRead for Truncate {}
impl CanRead for ReadAppend {}

impl CanWrite for ReadWrite {}
impl CanWrite for Write {}
impl CanWrite for Truncate {}
impl CanWrite for Append {}
impl CanWrite for ReadAppend {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        assert!(Mode::Read.can_read() && !Mode::Read.can_write());
        assert!(Mode::ReadWrite.can_read() && Mode::ReadWrite.can_write());
        assert!(!Mode::Write.can_read() && Mode::Write.can_write());
        assert!(Mode::Truncate.can_read() && Mode::Truncate.can_write());
        assert!(!Mode::Append.can_read() && Mode::Append.can_write());
        assert!(Mode::ReadAppend.can_read() && Mode::ReadAppend.can_write());
    }

    #[test]
    fn test_truncation_table() {
        assert!(Mode::Write.truncates());
        assert!(Mode::Truncate.truncates());
        assert!(!Mode::Read.truncates());
        assert!(!Mode::ReadWrite.truncates());
        assert!(!Mode::Append.truncates());
        assert!(!Mode::ReadAppend.truncates());
    }

    #[test]
    fn test_position_table() {
        assert!(Mode::Append.appends());
        assert!(Mode::ReadAppend.appends());
        assert!(!Mode::Read.appends());
        assert!(!Mode::ReadWrite.appends());
        assert!(!Mode::Write.appends());
        assert!(!Mode::Truncate.appends());
    }

    #[test]
    fn test_creation_table() {
        assert!(!Mode::Read.creates());
        assert!(!Mode::ReadWrite.creates());
        assert!(Mode::Write.creates());
        assert!(Mode::Truncate.creates());
        assert!(Mode::Append.creates());
        assert!(Mode::ReadAppend.creates());
    }

    #[test]
    fn test_marker_modes_match_runtime_modes() {
        assert_eq!(<Read as OpenMode>::MODE, Mode::Read);
        assert_eq!(<ReadWrite as OpenMode>::MODE, Mode::ReadWrite);
        assert_eq!(<Write as OpenMode>::MODE, Mode::Write);
        assert_eq!(<Truncate as OpenMode>::MODE, Mode::Truncate);
        assert_eq!(<Append as OpenMode>::MODE, Mode::Append);
        assert_eq!(<ReadAppend as OpenMode>::MODE, Mode::ReadAppend);
    }
}
