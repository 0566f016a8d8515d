//! Source line cache.
//!
//! Each report generation owns one `SourceLines`. A file is read in full on
//! its first lookup, split into lines and memoized; later lookups reuse the
//! split. Failures never propagate: an unreadable file yields
//! [`SOURCE_UNAVAILABLE`] and a bad line number yields [`LINE_OUT_OF_RANGE`].

use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SOURCE_UNAVAILABLE: &str = "[could not open source]";
pub const LINE_OUT_OF_RANGE: &str = "[line out of range]";

/// Reads a whole file. Swappable so tests can observe reads.
pub trait SourceReader {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local filesystem, replacing invalid UTF-8.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// `None` records a file that could not be read, so it is not retried.
type Entry = Option<Arc<Vec<String>>>;

pub struct SourceLines<R = FsReader> {
    reader: R,
    files: RwLock<HashMap<PathBuf, Entry>>,
}

impl SourceLines<FsReader> {
    pub fn new() -> Self {
        Self::with_reader(FsReader)
    }
}

impl Default for SourceLines<FsReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SourceReader> SourceLines<R> {
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Line `n` (1-based) of `path`, or a sentinel.
    pub fn line(&self, path: &Path, n: u32) -> String {
        let Some(lines) = self.load(path) else {
            return SOURCE_UNAVAILABLE.to_string();
        };
        match (n as usize).checked_sub(1).and_then(|idx| lines.get(idx)) {
            Some(text) => text.clone(),
            None => LINE_OUT_OF_RANGE.to_string(),
        }
    }

    /// Number of distinct files looked up so far.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(&self, path: &Path) -> Entry {
        if let Some(entry) = self.files.read().get(path) {
            return entry.clone();
        }
        // Read outside the lock; a racing loader may insert first, in which
        // case its entry wins and ours is dropped.
        let entry = match self.reader.read(path) {
            Ok(text) => Some(Arc::new(text.lines().map(str::to_owned).collect())),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "source unavailable");
                None
            }
        };
        self.files
            .write()
            .entry(path.to_path_buf())
            .or_insert(entry)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingReader {
        reads: AtomicUsize,
        files: HashMap<PathBuf, String>,
    }

    impl CountingReader {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                reads: AtomicUsize::new(0),
                files: files
                    .iter()
                    .map(|(p, c)| (PathBuf::from(p), c.to_string()))
                    .collect(),
            }
        }
    }

    impl SourceReader for &CountingReader {
        fn read(&self, path: &Path) -> io::Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }
    }

    #[test]
    fn test_line_lookup_and_out_of_range() {
        let reader = CountingReader::new(&[("/p/a.go", "package a\nfunc A() {}\n")]);
        let cache = SourceLines::with_reader(&reader);
        let path = Path::new("/p/a.go");
        assert_eq!(cache.line(path, 1), "package a");
        assert_eq!(cache.line(path, 2), "func A() {}");
        assert_eq!(cache.line(path, 3), LINE_OUT_OF_RANGE);
        assert_eq!(cache.line(path, 0), LINE_OUT_OF_RANGE);
    }

    #[test]
    fn test_file_is_read_once() {
        let reader = CountingReader::new(&[("/p/a.go", "one\ntwo")]);
        let cache = SourceLines::with_reader(&reader);
        cache.line(Path::new("/p/a.go"), 1);
        cache.line(Path::new("/p/a.go"), 2);
        assert_eq!(reader.reads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_file_is_sentinel() {
        let reader = CountingReader::new(&[]);
        let cache = SourceLines::with_reader(&reader);
        assert_eq!(cache.line(Path::new("/p/gone.go"), 1), SOURCE_UNAVAILABLE);
        assert_eq!(cache.line(Path::new("/p/gone.go"), 4), SOURCE_UNAVAILABLE);
        assert_eq!(reader.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let reader = CountingReader::new(&[("/p/w.py", "import os\r\nx = 1\r\n")]);
        let cache = SourceLines::with_reader(&reader);
        assert_eq!(cache.line(Path::new("/p/w.py"), 2), "x = 1");
    }

    #[test]
    fn test_concurrent_readers() {
        let reader = CountingReader::new(&[("/p/a.go", "l1\nl2\nl3"), ("/p/b.go", "m1")]);
        let cache = SourceLines::with_reader(&reader);
        let got: Vec<String> = (0..64u32)
            .into_par_iter()
            .map(|i| {
                if i % 2 == 0 {
                    cache.line(Path::new("/p/a.go"), i % 3 + 1)
                } else {
                    cache.line(Path::new("/p/b.go"), 1)
                }
            })
            .collect();
        assert!(got.iter().all(|l| l != SOURCE_UNAVAILABLE));
        assert_eq!(cache.len(), 2);
        // Racing first loads may each read before one insert wins
        let reads = reader.reads.load(Ordering::SeqCst);
        assert!((2..=64).contains(&reads));
    }

    #[test]
    fn test_reads_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.go");
        std::fs::write(&path, "package main\n\nfunc main() {\n\tfoo()\n}\n").unwrap();
        let cache = SourceLines::new();
        assert_eq!(cache.line(&path, 4), "\tfoo()");
    }
}
