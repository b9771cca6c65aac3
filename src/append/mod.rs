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

//! Byte sinks that formatted log lines are written to.

use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::Error;

mod stdio;
mod testing;
mod writer;

pub use self::writer::SharedWriter;

/// The destination of a [`LineLogger`](crate::LineLogger).
///
/// Cloning an `Output` clones the handle, not the destination: every clone of an
/// [`Output::Writer`] writes into the same underlying writer.
///
/// # Examples
///
/// ```
/// use logladder::append::Output;
///
/// let stdout = Output::Stdout;
/// let buffer = Output::writer(Vec::new());
/// assert_ne!(stdout, buffer);
/// assert_eq!(buffer, buffer.clone());
/// ```
#[derive(Clone)]
pub enum Output {
    /// The standard output stream of the process.
    Stdout,
    /// The standard error stream of the process.
    Stderr,
    /// Writes that the test harness (like `cargo test`) captures, and thus are suppressed unless
    /// `--nocapture` or `--show-output` is specified.
    Testing,
    /// A caller provided writer shared by all clones of this output.
    Writer(SharedWriter),
}

impl Output {
    /// Wrap any writer as an output.
    pub fn writer(writer: impl Write + Send + 'static) -> Output {
        Output::Writer(SharedWriter::new(writer))
    }

    /// Open `path` for appending, creating it if it does not exist.
    pub fn file(path: impl AsRef<Path>) -> Result<Output, Error> {
        writer::open_append(path.as_ref()).map(Output::Writer)
    }

    /// Write one complete line.
    ///
    /// The bytes are handed to the destination in a single `write_all` while holding the
    /// destination lock, so concurrent lines never interleave within a line.
    pub fn write_line(&self, line: &[u8]) -> Result<(), Error> {
        match self {
            Output::Stdout => stdio::write_stdout(line),
            Output::Stderr => stdio::write_stderr(line),
            Output::Testing => {
                testing::write_captured(line);
                Ok(())
            }
            Output::Writer(writer) => writer.write_line(line),
        }
    }

    /// Flush buffered bytes, if the destination buffers at all.
    pub fn flush(&self) -> Result<(), Error> {
        match self {
            Output::Stdout => stdio::flush_stdout(),
            Output::Stderr => stdio::flush_stderr(),
            Output::Testing => Ok(()),
            Output::Writer(writer) => writer.flush(),
        }
    }
}

impl PartialEq for Output {
    fn eq(&self, other: &Output) -> bool {
        match (self, other) {
            (Output::Stdout, Output::Stdout) => true,
            (Output::Stderr, Output::Stderr) => true,
            (Output::Testing, Output::Testing) => true,
            (Output::Writer(a), Output::Writer(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("Stdout"),
            Output::Stderr => f.write_str("Stderr"),
            Output::Testing => f.write_str("Testing"),
            Output::Writer(writer) => f.debug_tuple("Writer").field(writer).finish(),
        }
    }
}
