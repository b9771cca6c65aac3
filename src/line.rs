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

//! The line logger: one label, one set of [`Flags`], one [`Output`].

use std::fmt;
use std::fmt::Write as _;
use std::panic::Location;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::Flags;
use crate::SinkConfig;
use crate::append::Output;

/// The source location a line is attributed to when [`Flags::SHORT_FILE`] or
/// [`Flags::LONG_FILE`] is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    /// Source file path.
    pub file: &'a str,
    /// Line number in `file`.
    pub line: u32,
}

impl Caller<'static> {
    /// The location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn here() -> Self {
        Caller::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for Caller<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Caller {
            file: location.file(),
            line: location.line(),
        }
    }
}

#[derive(Debug, Clone)]
struct LineState {
    output: Output,
    label: String,
    flags: Flags,
    #[cfg(feature = "colored")]
    color: Option<colored::Color>,
}

/// A logger that formats each message as one line and writes it to its [`Output`].
///
/// Every line consists of the label, an optional header controlled by [`Flags`] and the message:
///
/// ```text
/// INFO     2009/01/23 01:23:23.123123 listening on 0.0.0.0:8080
/// ERROR    2009/01/23 01:23:24.000042 connection reset
/// ```
///
/// A `LineLogger` never filters: whatever it is asked to print is written. Its output, label and
/// flags may be changed in place while other threads are printing through it.
///
/// # Examples
///
/// ```
/// use logladder::Flags;
/// use logladder::LineLogger;
/// use logladder::append::Output;
///
/// let logger = LineLogger::new(Output::Testing, "app ", Flags::empty());
/// logger.print("hello");
/// logger.printf(format_args!("{} + {} = {}", 1, 2, 1 + 2));
/// ```
#[derive(Debug)]
pub struct LineLogger {
    state: RwLock<LineState>,
}

impl LineLogger {
    /// Create a new line logger.
    pub fn new(output: Output, label: impl Into<String>, flags: Flags) -> Self {
        Self {
            state: RwLock::new(LineState {
                output,
                label: label.into(),
                flags,
                #[cfg(feature = "colored")]
                color: None,
            }),
        }
    }

    /// Create a new line logger from a sink configuration.
    pub fn from_config(config: &SinkConfig) -> Self {
        let logger = Self::new(config.output.clone(), config.label.clone(), config.flags);
        #[cfg(feature = "colored")]
        logger.set_color(config.color);
        logger
    }

    /// The current output.
    pub fn output(&self) -> Output {
        self.read().output.clone()
    }

    /// Replace the output. Lines being written concurrently finish on the old output.
    pub fn set_output(&self, output: Output) {
        self.write().output = output;
    }

    /// The current label.
    pub fn label(&self) -> String {
        self.read().label.clone()
    }

    /// Replace the label.
    pub fn set_label(&self, label: impl Into<String>) {
        self.write().label = label.into();
    }

    /// The current flags.
    pub fn flags(&self) -> Flags {
        self.read().flags
    }

    /// Replace the flags.
    pub fn set_flags(&self, flags: Flags) {
        self.write().flags = flags;
    }

    /// Set or clear the color of the label.
    #[cfg(feature = "colored")]
    pub fn set_color(&self, color: Option<colored::Color>) {
        self.write().color = color;
    }

    /// Format and write one line, reporting write failures.
    ///
    /// A trailing newline is appended unless the message already ends with one.
    pub fn write_line(
        &self,
        caller: Option<Caller<'_>>,
        args: fmt::Arguments,
    ) -> Result<(), Error> {
        let now = Timestamp::now();
        // formatting may log recursively, so render without holding the lock
        let state = self.read().clone();
        let line = render(&state, now, caller, args);
        state.output.write_line(line.as_bytes())
    }

    /// Print `message` as one line. Write failures are ignored.
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.printf(format_args!("{message}"));
    }

    /// Print the formatted arguments as one line. Write failures are ignored.
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments) {
        let _ = self.write_line(Some(Caller::here()), args);
    }

    /// Print `message`, then terminate the process with exit code 1.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.fatalf(format_args!("{message}"))
    }

    /// Print the formatted arguments, then terminate the process with exit code 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments) -> ! {
        self.printf(args);
        let _ = self.flush();
        std::process::exit(1)
    }

    /// Print `message`, then panic with the same message.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.panicf(format_args!("{message}"))
    }

    /// Print the formatted arguments, then panic with the same message.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments) -> ! {
        let message = args.to_string();
        self.printf(format_args!("{message}"));
        panic!("{message}")
    }

    /// Flush the output.
    pub fn flush(&self) -> Result<(), Error> {
        self.output().flush()
    }

    fn read(&self) -> RwLockReadGuard<'_, LineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn render(
    state: &LineState,
    now: Timestamp,
    caller: Option<Caller<'_>>,
    args: fmt::Arguments,
) -> String {
    let flags = state.flags;
    let mut line = String::with_capacity(64);

    if !flags.contains(Flags::MSG_PREFIX) {
        write_label(&mut line, state);
    }

    if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
        let tz = if flags.contains(Flags::UTC) {
            TimeZone::UTC
        } else {
            TimeZone::system()
        };
        let now = now.to_zoned(tz);
        if flags.contains(Flags::DATE) {
            line.push_str(&now.strftime("%Y/%m/%d ").to_string());
        }
        if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
            line.push_str(&now.strftime("%H:%M:%S").to_string());
            if flags.contains(Flags::MICROSECONDS) {
                line.push_str(&now.strftime(".%6f").to_string());
            }
            line.push(' ');
        }
    }

    if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
        let (file, lineno) = match caller {
            Some(caller) => (caller.file, caller.line),
            None => ("???", 0),
        };
        let file = if flags.contains(Flags::SHORT_FILE) {
            file.rsplit(['/', '\\']).next().unwrap_or(file)
        } else {
            file
        };
        // SAFETY: write to a string always succeeds
        write!(&mut line, "{file}:{lineno}: ").unwrap();
    }

    if flags.contains(Flags::MSG_PREFIX) {
        write_label(&mut line, state);
    }

    // SAFETY: write to a string always succeeds
    line.write_fmt(args).unwrap();
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

#[cfg(not(feature = "colored"))]
fn write_label(line: &mut String, state: &LineState) {
    line.push_str(&state.label);
}

#[cfg(feature = "colored")]
fn write_label(line: &mut String, state: &LineState) {
    use colored::Colorize;

    match state.color {
        // SAFETY: write to a string always succeeds
        Some(color) => write!(line, "{}", state.label.as_str().color(color)).unwrap(),
        None => line.push_str(&state.label),
    }
}
