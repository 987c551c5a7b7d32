use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Lines handed to a worker; an `Err` item ends that worker's stream
pub type LineIter<'a> = Box<dyn Iterator<Item = io::Result<String>> + Send + 'a>;

/// Line-addressable input shared by all workers of a run
///
/// The planner needs the total line count up front, and each worker reads
/// its own `[start, start + len)` window independently of the others, so
/// implementations must tolerate concurrent `read_range` calls.
///
/// # Example
///
/// ```
/// use shipping_discounts::source::{LineSource, MemorySource};
///
/// let source = MemorySource::from_text("2015-02-01 S MR\n2015-02-02 S LP\n");
/// assert_eq!(source.count_lines().unwrap(), 2);
///
/// let second: Vec<String> = source
///     .read_range(1, 5)
///     .unwrap()
///     .map(|line| line.unwrap())
///     .collect();
/// assert_eq!(second, vec!["2015-02-02 S LP".to_string()]);
/// ```
pub trait LineSource: Send + Sync {
    /// Count every line, including a final line without a trailing newline
    fn count_lines(&self) -> Result<usize>;

    /// Skip `start` lines and yield at most `len` following ones, newline stripped
    ///
    /// Yields fewer than `len` lines when the input ends early.
    fn read_range(&self, start: usize, len: usize) -> Result<LineIter<'_>>;
}

/// Text file on disk, reopened by every reader
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Check that `path` can be opened and remember it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        File::open(&path)?;
        Ok(Self { path })
    }
}

impl LineSource for FileSource {
    fn count_lines(&self) -> Result<usize> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut buf = Vec::new();
        let mut count = 0;

        while reader.read_until(b'\n', &mut buf)? > 0 {
            count += 1;
            buf.clear();
        }

        Ok(count)
    }

    fn read_range(&self, start: usize, len: usize) -> Result<LineIter<'_>> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut buf = Vec::new();

        for _ in 0..start {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
        }

        Ok(Box::new(RangeLines {
            reader,
            remaining: len,
            buf,
        }))
    }
}

/// Lines of `reader` with `\n`/`\r\n` stripped and invalid UTF-8 replaced
///
/// Only real read failures come back as `Err`; undecodable bytes do not.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    RangeLines {
        reader,
        remaining: usize::MAX,
        buf: Vec::new(),
    }
}

/// Bounded line iterator over a positioned reader
struct RangeLines<R> {
    reader: R,
    remaining: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for RangeLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.remaining = 0;
                None
            }
            Ok(_) => {
                self.remaining -= 1;
                let mut end = self.buf.len();
                if self.buf[..end].ends_with(b"\n") {
                    end -= 1;
                }
                if self.buf[..end].ends_with(b"\r") {
                    end -= 1;
                }
                // Invalid UTF-8 becomes a rejected line, not a stream failure
                Some(Ok(String::from_utf8_lossy(&self.buf[..end]).into_owned()))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }
}

/// In-memory lines, mainly for tests and callers that already hold the input
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_string).collect())
    }
}

impl LineSource for MemorySource {
    fn count_lines(&self) -> Result<usize> {
        Ok(self.lines.len())
    }

    fn read_range(&self, start: usize, len: usize) -> Result<LineIter<'_>> {
        Ok(Box::new(
            self.lines.iter().skip(start).take(len).cloned().map(Ok),
        ))
    }
}
