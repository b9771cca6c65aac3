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

use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::LevelFilter;
use crate::LeveledLogger;
use crate::LineLogger;
use crate::line::Caller;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Critical | Level::Error => Self::Error,
            Level::Warning => Self::Warn,
            Level::Notice | Level::Info => Self::Info,
            Level::Debug => Self::Debug,
            Level::Trace => Self::Trace,
        }
    }
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(filter: LevelFilter) -> Self {
        match filter.level() {
            Some(level) => log::Level::from(level).to_level_filter(),
            None => Self::Trace,
        }
    }
}

fn caller<'a>(record: &log::Record<'a>) -> Option<Caller<'a>> {
    record.file().map(|file| Caller {
        file,
        line: record.line().unwrap_or_default(),
    })
}

impl log::Log for LeveledLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LeveledLogger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if LeveledLogger::enabled(self, level) {
            let _ = self.sink(level).write_line(caller(record), *record.args());
        }
    }

    fn flush(&self) {
        let _ = LeveledLogger::flush(self);
    }
}

// unconditional: a line logger has no filter of its own
impl log::Log for LineLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let _ = self.write_line(caller(record), *record.args());
    }

    fn flush(&self) {
        let _ = LineLogger::flush(self);
    }
}

impl LeveledLogger {
    /// Set up this logger as the global [`log`] logger and return a handle to it.
    ///
    /// The `log` crate's maximum level is set to `Trace`; this logger's own filter decides what
    /// is written, and can still be changed through the returned handle.
    ///
    /// # Errors
    ///
    /// This function will fail if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn try_install(self) -> Result<&'static LeveledLogger, Error> {
        let logger: &'static LeveledLogger = Box::leak(Box::new(self));
        log::set_logger(logger).map_err(|err| {
            Error::new(ErrorKind::SetLogger, "failed to set global logger").with_source(err)
        })?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(logger)
    }

    /// Set up this logger as the global [`log`] logger and return a handle to it.
    ///
    /// # Panics
    ///
    /// This function will panic if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn install(self) -> &'static LeveledLogger {
        self.try_install().expect(
            "LeveledLogger::install should not be called after the global logger initialized",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trip_through_log() {
        for level in [
            log::Level::Error,
            log::Level::Warn,
            log::Level::Info,
            log::Level::Debug,
            log::Level::Trace,
        ] {
            assert_eq!(log::Level::from(Level::from(level)), level);
        }
        assert_eq!(log::Level::from(Level::Critical), log::Level::Error);
        assert_eq!(log::Level::from(Level::Notice), log::Level::Info);
    }

    #[test]
    fn filter_to_log_filter() {
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Critical),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Warning),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::All),
            log::LevelFilter::Trace
        );
    }
}
