//! Whole-file convenience operations.
//!
//! Each function opens a handle, performs one operation, and closes it when
//! the handle leaves scope. [`read`] defends against the file changing size
//! between the length probe and the read: it drains to true end-of-file in
//! small chunks, so a file that grew is read completely and a file that
//! shrank yields only the bytes actually present.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::FileResult;
use crate::handle::{Reader, Writer};

/// Chunk size for draining bytes that appeared after the length probe.
const DRAIN_CHUNK_SIZE: usize = 16;

/// Read the entire contents of the file at `path`.
pub fn read<P: AsRef<Path>>(path: P) -> FileResult<Vec<u8>> {
    let path = path.as_ref();
    let expected = size(path)?;
    let contents = read_with_expected_size(path, expected as usize)?;
    debug!(path = %path.display(), bytes = contents.len(), "read file");
    Ok(contents)
}

/// Read the whole file given a possibly stale length measurement. Reads the
/// expected number of bytes, trims if the file shrank, then drains anything
/// past the measured length until a zero-length read.
fn read_with_expected_size(path: &Path, expected: usize) -> FileResult<Vec<u8>> {
    let mut reader = Reader::open(path)?;

    let mut contents = vec![0u8; expected];
    let mut filled = 0;
    while filled < expected {
        let n = reader.read(&mut contents[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    contents.truncate(filled);

    let mut chunk = [0u8; DRAIN_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        contents.extend_from_slice(&chunk[..n]);
    }

    Ok(contents)
}

/// Write `data` over the file at `path`, truncating any previous contents
/// and creating the file if needed. Returns the number of bytes written.
pub fn write<P: AsRef<Path>, D: AsRef<[u8]>>(path: P, data: D) -> FileResult<usize> {
    let path = path.as_ref();
    let written = Writer::open(path)?.write(data.as_ref())?;
    debug!(path = %path.display(), bytes = written, "wrote file");
    Ok(written)
}

/// The current length in bytes of the file at `path`, without opening it
/// for reading or writing. The value can become stale immediately.
pub fn size<P: AsRef<Path>>(path: P) -> FileResult<u64> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|source| crate::Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(metadata.len())
}

/// Read every line of the file at `path` under the native line policy.
pub fn read_lines<P: AsRef<Path>>(path: P) -> FileResult<Vec<String>> {
    Reader::open(path)?.read_lines()
}

/// Write `lines` over the file at `path`, each followed by the native
/// terminator. Returns the total bytes written.
pub fn write_lines<P, I>(path: P, lines: I) -> FileResult<usize>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Writer::open(path)?.write_lines(lines)
}

/// Apply `f` to each line of the file at `path`.
pub fn for_each_line<P: AsRef<Path>, F: FnMut(&str)>(path: P, f: F) -> FileResult<()> {
    Reader::open(path)?.for_each_line(f)
}
