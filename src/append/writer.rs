// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::Error;
use crate::ErrorKind;

/// A writer shared between clones, serialized by a mutex.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    /// Wrap `writer` so that it can be shared between sinks and threads.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Whether both handles point to the same writer.
    pub fn ptr_eq(&self, other: &SharedWriter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(super) fn write_line(&self, line: &[u8]) -> Result<(), Error> {
        self.lock().write_all(line).map_err(Error::from_io_error)
    }

    pub(super) fn flush(&self) -> Result<(), Error> {
        self.lock().flush().map_err(Error::from_io_error)
    }

    // a poisoned writer keeps accepting lines
    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedWriter({:p})", Arc::as_ptr(&self.inner))
    }
}

pub(super) fn open_append(path: &Path) -> Result<SharedWriter, Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| {
            Error::new(ErrorKind::Io, "failed to open log file")
                .with_context("path", path.display())
                .with_source(err)
        })?;
    Ok(SharedWriter::new(file))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn clones_share_one_writer() {
        let buffer = Buffer::default();
        let writer = SharedWriter::new(buffer.clone());
        let other = writer.clone();
        assert!(writer.ptr_eq(&other));
        assert!(!writer.ptr_eq(&SharedWriter::new(Buffer::default())));

        writer.write_line(b"first\n").unwrap();
        other.write_line(b"second\n").unwrap();
        assert_eq!(buffer.0.lock().unwrap().as_slice(), b"first\nsecond\n");
    }

    #[test]
    fn open_append_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("out.log");
        let err = open_append(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("no-such-dir"));
    }

    #[test]
    fn open_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "existing\n").unwrap();

        let writer = open_append(&path).unwrap();
        writer.write_line(b"appended\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "existing\nappended\n"
        );
    }
}
