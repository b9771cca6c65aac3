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
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use super::builder::Builder;
use crate::Error;
use crate::Flags;
use crate::Level;
use crate::LevelFilter;
use crate::LineLogger;
use crate::Setting;
use crate::SinkConfig;
use crate::append::Output;
use crate::record::LEVELS;

type SinkTable = [Arc<LineLogger>; 7];

/// A logger with one [`LineLogger`] per [`Level`] and a shared [`LevelFilter`].
///
/// Every gated call compares its level against the current filter and, if admitted, prints one
/// line through that level's sink. The filter and the sinks may be changed at any time from any
/// thread.
///
/// By default the filter is [`LevelFilter::Info`], `Critical` and `Error` lines go to standard
/// error, all other levels go to standard output, each sink is labelled with its padded level
/// name and uses [`Flags::DEFAULT`].
///
/// # Examples
///
/// ```
/// use logladder::LeveledLogger;
/// use logladder::LevelFilter;
/// use logladder::SinkConfig;
/// use logladder::append::Output;
///
/// let logger = LeveledLogger::builder()
///     .all_default(SinkConfig::new(Output::Testing))
///     .level(LevelFilter::Warning)
///     .build();
///
/// logger.info("dropped");
/// logger.warning("written");
/// logladder::error!(logger, "written too: {}", 42);
/// ```
#[derive(Debug)]
pub struct LeveledLogger {
    filter: AtomicU8,
    sinks: RwLock<SinkTable>,
}

impl Default for LeveledLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LeveledLogger {
    /// Create a logger with the default configuration.
    pub fn new() -> LeveledLogger {
        let sinks = LEVELS.map(|level| {
            let config = SinkConfig::default_for(level);
            Arc::new(LineLogger::from_config(&config))
        });

        Self {
            filter: AtomicU8::new(LevelFilter::default().ordinal()),
            sinks: RwLock::new(sinks),
        }
    }

    /// Create a logger with the default configuration, then apply `settings` in order.
    pub fn with(settings: impl IntoIterator<Item = Setting>) -> LeveledLogger {
        let logger = Self::new();
        for setting in settings {
            logger.apply(setting);
        }
        logger
    }

    /// Create a new empty [`Builder`].
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Apply one configuration change.
    ///
    /// Replacing a whole sink builds a fresh [`LineLogger`]; handles obtained earlier through
    /// [`LeveledLogger::sink`] keep the old one. Changing a single field (output, label or flags)
    /// mutates the existing line logger in place, so earlier handles observe it.
    pub fn apply(&self, setting: Setting) {
        let targets = setting.targets();
        match setting {
            Setting::Sink(_, config)
            | Setting::GroupDefault(config)
            | Setting::ErrorGroupDefault(config)
            | Setting::AllDefault(config) => {
                let mut sinks = self.sinks.write().unwrap_or_else(PoisonError::into_inner);
                for level in targets {
                    sinks[level.index()] = Arc::new(LineLogger::from_config(&config));
                }
            }
            Setting::Output(_, output) => {
                self.for_each_sink(targets, |sink| sink.set_output(output.clone()))
            }
            Setting::Label(_, label) => {
                self.for_each_sink(targets, |sink| sink.set_label(label.as_str()))
            }
            Setting::Flags(_, flags) => self.for_each_sink(targets, |sink| sink.set_flags(flags)),
            Setting::Level(filter) => self.store_level(filter),
            Setting::LevelName(name) => self.set_level_by_name(&name),
        }
    }

    /// Replace the sink of `level`.
    pub fn set_sink(&self, level: Level, config: SinkConfig) {
        self.apply(Setting::Sink(level, config));
    }

    /// Replace the sinks of `Warning`, `Notice`, `Info`, `Debug` and `Trace`.
    ///
    /// Each level gets its own [`LineLogger`]; they share only the configured output.
    pub fn set_group_default(&self, config: SinkConfig) {
        self.apply(Setting::GroupDefault(config));
    }

    /// Replace the sinks of `Critical` and `Error`.
    pub fn set_error_group_default(&self, config: SinkConfig) {
        self.apply(Setting::ErrorGroupDefault(config));
    }

    /// Replace the sinks of all seven levels.
    pub fn set_all_default(&self, config: SinkConfig) {
        self.apply(Setting::AllDefault(config));
    }

    /// Replace the output of `level`'s sink, or of every sink for [`LevelFilter::All`].
    pub fn set_output(&self, level: impl Into<LevelFilter>, output: Output) {
        self.apply(Setting::Output(level.into(), output));
    }

    /// Replace the label of `level`'s sink, or of every sink for [`LevelFilter::All`].
    pub fn set_label(&self, level: impl Into<LevelFilter>, label: impl Into<String>) {
        self.apply(Setting::Label(level.into(), label.into()));
    }

    /// Replace the flags of `level`'s sink, or of every sink for [`LevelFilter::All`].
    pub fn set_flags(&self, level: impl Into<LevelFilter>, flags: Flags) {
        self.apply(Setting::Flags(level.into(), flags));
    }

    /// The line logger of `level`.
    ///
    /// Printing through the returned handle bypasses the level filter.
    pub fn sink(&self, level: Level) -> Arc<LineLogger> {
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner);
        sinks[level.index()].clone()
    }

    /// Set the filter level.
    pub fn set_level(&self, level: impl Into<LevelFilter>) {
        self.apply(Setting::Level(level.into()));
    }

    /// The current filter level.
    pub fn level(&self) -> LevelFilter {
        let ordinal = self.filter.load(Ordering::Relaxed);
        // only ever stored from a valid `LevelFilter`
        LevelFilter::from_ordinal(ordinal).unwrap_or_default()
    }

    /// The name of the current filter level.
    pub fn level_name(&self) -> &'static str {
        self.level().as_str()
    }

    /// Set the filter level by name, trimmed and ignoring ASCII case.
    ///
    /// An unknown name leaves the filter level unchanged; see
    /// [`LeveledLogger::try_set_level_by_name`] to detect it.
    ///
    /// ```
    /// use logladder::LeveledLogger;
    /// use logladder::LevelFilter;
    ///
    /// let logger = LeveledLogger::new();
    /// logger.set_level_by_name(" debug ");
    /// assert_eq!(logger.level(), LevelFilter::Debug);
    /// logger.set_level_by_name("verbose");
    /// assert_eq!(logger.level(), LevelFilter::Debug);
    /// ```
    pub fn set_level_by_name(&self, name: &str) {
        let _ = self.try_set_level_by_name(name);
    }

    /// Set the filter level by name, failing on an unknown name without changing the level.
    pub fn try_set_level_by_name(&self, name: &str) -> Result<LevelFilter, Error> {
        let filter = name.parse::<LevelFilter>()?;
        self.store_level(filter);
        Ok(filter)
    }

    /// Set the filter level by ordinal, `0` for `Critical` up to `7` for `All`.
    ///
    /// An out of range ordinal leaves the filter level unchanged.
    pub fn set_level_ordinal(&self, ordinal: u8) {
        if let Some(filter) = LevelFilter::from_ordinal(ordinal) {
            self.store_level(filter);
        }
    }

    /// All names accepted by [`LeveledLogger::set_level_by_name`], most restrictive first.
    pub fn available_level_names(&self) -> [&'static str; 8] {
        LevelFilter::names()
    }

    /// Whether a message at `level` passes the current filter.
    pub fn enabled(&self, level: Level) -> bool {
        self.level().enables(level)
    }

    /// Print the formatted arguments to `level`'s sink if the filter admits `level`.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments) {
        if self.enabled(level) {
            self.sink(level).printf(args);
        }
    }

    /// Print `message` to the `Critical` sink regardless of the filter, then exit the process
    /// with code 1.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.sink(Level::Critical).fatal(message)
    }

    /// Print the formatted arguments to the `Critical` sink regardless of the filter, then exit
    /// the process with code 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments) -> ! {
        self.sink(Level::Critical).fatalf(args)
    }

    /// Print `message` to the `Critical` sink regardless of the filter, then panic with it.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.sink(Level::Critical).panic(message)
    }

    /// Print the formatted arguments to the `Critical` sink regardless of the filter, then panic
    /// with them.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments) -> ! {
        self.sink(Level::Critical).panicf(args)
    }

    /// Flush the outputs of all sinks, returning the first failure.
    pub fn flush(&self) -> Result<(), Error> {
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner).clone();
        let mut first_err = None;
        for sink in sinks.iter() {
            if let Err(err) = sink.flush() {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn store_level(&self, filter: LevelFilter) {
        self.filter.store(filter.ordinal(), Ordering::Relaxed);
    }

    fn for_each_sink(&self, targets: &[Level], f: impl Fn(&LineLogger)) {
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner);
        for level in targets {
            f(&sinks[level.index()]);
        }
    }
}

macro_rules! level_methods {
    ($($level:ident => $print:ident, $printf:ident, $handle:ident;)+) => {
        impl LeveledLogger {
            $(
                #[doc = concat!("Print `message` to the `", stringify!($level), "` sink if admitted.")]
                #[track_caller]
                pub fn $print(&self, message: impl fmt::Display) {
                    self.log(Level::$level, format_args!("{}", message));
                }

                #[doc = concat!(
                    "Print the formatted arguments to the `",
                    stringify!($level),
                    "` sink if admitted."
                )]
                #[track_caller]
                pub fn $printf(&self, args: fmt::Arguments) {
                    self.log(Level::$level, args);
                }

                #[doc = concat!(
                    "The `",
                    stringify!($level),
                    "` line logger; printing through it bypasses the filter."
                )]
                pub fn $handle(&self) -> Arc<LineLogger> {
                    self.sink(Level::$level)
                }
            )+
        }
    };
}

level_methods! {
    Critical => critical, criticalf, critical_logger;
    Error => error, errorf, error_logger;
    Warning => warning, warningf, warning_logger;
    Notice => notice, noticef, notice_logger;
    Info => info, infof, info_logger;
    Debug => debug, debugf, debug_logger;
    Trace => trace, tracef, trace_logger;
}
