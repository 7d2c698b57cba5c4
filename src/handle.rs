//! Capability-typed file handles.
//!
//! A [`Handle`] owns one open `std::fs::File` and exposes only the
//! operations valid for the mode it was opened with: read methods exist
//! when the mode marker implements [`CanRead`], write methods when it
//! implements [`CanWrite`]. Calling a read method on a write-only handle is
//! a compile error, not a runtime one.
//!
//! Handles also implement the std `io::Read`, `io::Write` and `io::Seek`
//! traits (again gated by capability), so they compose with `BufReader`
//! and the rest of the standard library.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::Path;

use tracing::trace;

use crate::eol::{Eol, LinePolicy, read_line_from};
use crate::mode::{self, CanRead, CanWrite, OpenMode};
use crate::{Error, FileResult};

/// Read-only handle, positioned at the start.
pub type Reader = Handle<mode::Read>;
/// Read-write handle, positioned at the start, no truncation.
pub type ReaderWriter = Handle<mode::ReadWrite>;
/// Write-only handle, truncated to empty, created if missing.
pub type Writer = Handle<mode::Write>;
/// Read-write handle, truncated to empty, created if missing.
pub type TruncateReaderWriter = Handle<mode::Truncate>;
/// Write-only handle, positioned at the end, created if missing.
pub type Appender = Handle<mode::Append>;
/// Read-write handle, positioned at the end, created if missing.
pub type ReaderAppender = Handle<mode::ReadAppend>;

/// An owned handle to one open file, parameterized by open mode.
///
/// The handle releases its file exactly once: on `close()`, on drop, or
/// never if the file was taken back with `release()`. An empty handle
/// (default, closed, or released) owns nothing; reads and writes on it
/// transfer zero bytes.
#[derive(Debug)]
pub struct Handle<M: OpenMode> {
    file: Option<File>,
    eof: bool,
    _mode: PhantomData<M>,
}

impl<M: OpenMode> Handle<M> {
    /// Open `path` in this handle's mode.
    ///
    /// Fails with [`Error::Open`] carrying the path if the underlying open
    /// call fails. Append modes are positioned at the end of the file.
    pub fn open<P: AsRef<Path>>(path: P) -> FileResult<Self> {
        let path = path.as_ref();
        let file = M::MODE.open_options().open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut handle = Self::from_file(file);
        if M::MODE.appends() {
            handle.seek(SeekFrom::End(0))?;
        }
        trace!(path = %path.display(), mode = ?M::MODE, "opened file");
        Ok(handle)
    }

    /// A handle that owns nothing.
    pub fn empty() -> Self {
        Self {
            file: None,
            eof: false,
            _mode: PhantomData,
        }
    }

    /// Wrap an already-open file. The handle takes ownership and will close
    /// it on drop; the caller is responsible for the file's position and
    /// access mode matching this handle type.
    pub fn from_file(file: File) -> Self {
        Self {
            file: Some(file),
            eof: false,
            _mode: PhantomData,
        }
    }

    /// The underlying file, if the handle owns one.
    pub fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    /// Whether the handle currently owns an open file.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Close the underlying file. Safe to call any number of times; a
    /// closed or empty handle stays empty.
    pub fn close(&mut self) {
        if let Some(file) = self.file.take() {
            trace!("closing file handle");
            drop(file);
        }
        self.eof = false;
    }

    /// Give up ownership of the file without closing it. The handle becomes
    /// empty and the caller assumes responsibility for the file.
    pub fn release(&mut self) -> Option<File> {
        self.eof = false;
        self.file.take()
    }

    /// Seek to a position. Clears the end-of-file flag. Seeking an empty
    /// handle is a no-op returning position 0.
    pub fn seek(&mut self, pos: SeekFrom) -> FileResult<u64> {
        io::Seek::seek(self, pos).map_err(Into::into)
    }

    /// True once a read has hit the end of the file. Cleared by `seek`.
    pub fn eof(&self) -> bool {
        self.eof
    }
}

impl<M: OpenMode> Default for Handle<M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<M: OpenMode> From<File> for Handle<M> {
    fn from(file: File) -> Self {
        Self::from_file(file)
    }
}

impl<M: CanRead> Handle<M> {
    /// Read up to `buf.len()` bytes. Returns the number of bytes read;
    /// zero signals end-of-file (or an empty handle).
    pub fn read(&mut self, buf: &mut [u8]) -> FileResult<usize> {
        loop {
            match io::Read::read(self, buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read up to `count` bytes into a fresh buffer, trimmed to the bytes
    /// actually read.
    pub fn read_bytes(&mut self, count: usize) -> FileResult<Vec<u8>> {
        let mut buf = vec![0u8; count];
        let mut filled = 0;
        while filled < count {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);
        Ok(buf)
    }

    /// Read one line under the platform's native policy. See
    /// [`read_line_with`](Self::read_line_with).
    pub fn read_line(&mut self, line: &mut String) -> FileResult<bool> {
        self.read_line_with(LinePolicy::NATIVE, line)
    }

    /// Read one line into `line` (cleared first, terminator excluded).
    /// Returns `Ok(false)` only when no bytes could be produced; a final
    /// unterminated line is still a successful line. Invalid UTF-8 is
    /// replaced lossily.
    pub fn read_line_with(&mut self, policy: LinePolicy, line: &mut String) -> FileResult<bool> {
        line.clear();
        let mut bytes = Vec::new();
        let ok = read_line_from(self, policy, &mut bytes)?;
        line.push_str(&String::from_utf8_lossy(&bytes));
        Ok(ok)
    }

    /// Iterate over the remaining lines under the native policy.
    pub fn lines(&mut self) -> Lines<'_, M> {
        self.lines_with(LinePolicy::NATIVE)
    }

    /// Iterate over the remaining lines under an explicit policy.
    pub fn lines_with(&mut self, policy: LinePolicy) -> Lines<'_, M> {
        Lines { handle: self, policy }
    }

    /// Collect all remaining lines.
    pub fn read_lines(&mut self) -> FileResult<Vec<String>> {
        self.lines().collect()
    }

    /// Apply `f` to each remaining line.
    pub fn for_each_line<F: FnMut(&str)>(&mut self, mut f: F) -> FileResult<()> {
        let mut line = String::new();
        while self.read_line(&mut line)? {
            f(&line);
        }
        Ok(())
    }
}

impl<M: CanWrite> Handle<M> {
    /// Write `data` in one underlying call. Returns the number of bytes
    /// written, which may be fewer than requested.
    pub fn write(&mut self, data: &[u8]) -> FileResult<usize> {
        loop {
            match io::Write::write(self, data) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Write a string slice.
    pub fn write_str(&mut self, s: &str) -> FileResult<usize> {
        self.write(s.as_bytes())
    }

    /// Write `line` followed by the platform's native terminator.
    pub fn write_line(&mut self, line: &str) -> FileResult<usize> {
        self.write_line_with(Eol::NATIVE, line)
    }

    /// Write `line` followed by an explicit terminator. Returns the total
    /// bytes written including the terminator.
    pub fn write_line_with(&mut self, eol: Eol, line: &str) -> FileResult<usize> {
        Ok(self.write(line.as_bytes())? + self.write(eol.as_bytes())?)
    }

    /// Write every line in `lines`, each followed by the native terminator.
    /// Returns the total bytes written.
    pub fn write_lines<I>(&mut self, lines: I) -> FileResult<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.write_lines_with(Eol::NATIVE, lines)
    }

    /// Write every line in `lines` with an explicit terminator.
    pub fn write_lines_with<I>(&mut self, eol: Eol, lines: I) -> FileResult<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut written = 0;
        for line in lines {
            written += self.write_line_with(eol, line.as_ref())?;
        }
        Ok(written)
    }

    /// Flush buffered writes to the operating system.
    pub fn flush(&mut self) -> FileResult<()> {
        io::Write::flush(self)?;
        Ok(())
    }
}

impl<M: CanRead> io::Read for Handle<M> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(file) = self.file.as_mut() else {
            return Ok(0);
        };
        let n = file.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.eof = true;
        }
        Ok(n)
    }
}

impl<M: CanWrite> io::Write for Handle<M> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(file) = self.file.as_mut() else {
            return Ok(0);
        };
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<M: OpenMode> io::Seek for Handle<M> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let Some(file) = self.file.as_mut() else {
            return Ok(0);
        };
        let position = file.seek(pos)?;
        self.eof = false;
        Ok(position)
    }
}

/// Iterator over the lines of a readable handle.
///
/// Yields `FileResult<String>`; iteration ends at the first read that
/// produces no bytes.
#[derive(Debug)]
pub struct Lines<'a, M: CanRead> {
    handle: &'a mut Handle<M>,
    policy: LinePolicy,
}

impl<M: CanRead> Iterator for Lines<'_, M> {
    type Item = FileResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.handle.read_line_with(self.policy, &mut line) {
            Ok(true) => Some(Ok(line)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
