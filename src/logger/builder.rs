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

use std::ffi::OsStr;

use super::logger::LeveledLogger;
use crate::Error;
use crate::Flags;
use crate::Level;
use crate::LevelFilter;
use crate::Setting;
use crate::SinkConfig;
use crate::append::Output;

/// Create a new empty [builder][Builder].
///
/// ```rust
/// use logladder::Level;
/// use logladder::LevelFilter;
/// use logladder::SinkConfig;
/// use logladder::append::Output;
///
/// let logger = logladder::builder()
///     .group_default(SinkConfig::new(Output::Testing))
///     .sink(Level::Debug, SinkConfig::new(Output::Stderr).label("dbg "))
///     .level(LevelFilter::Debug)
///     .build();
/// ```
pub fn builder() -> Builder {
    Builder::new()
}

/// A builder collecting [`Setting`]s for a [`LeveledLogger`].
///
/// Settings are applied in the order they were added when the logger is built, on top of the
/// default configuration. A later setting wins over an earlier one for the same level:
///
/// ```rust
/// use logladder::Level;
/// use logladder::SinkConfig;
/// use logladder::append::Output;
///
/// let logger = logladder::builder()
///     .sink(Level::Info, SinkConfig::new(Output::Stderr))
///     // replaces the Info sink configured above
///     .group_default(SinkConfig::new(Output::Testing))
///     .build();
/// assert_eq!(logger.sink(Level::Info).output(), Output::Testing);
/// ```
#[must_use = "call `build` to create the logger or `apply` to set the global logger"]
#[derive(Debug, Default)]
pub struct Builder {
    settings: Vec<Setting>,
}

impl Builder {
    /// Create a new empty [`Builder`].
    pub fn new() -> Self {
        Self { settings: vec![] }
    }

    /// Add a [`Setting`].
    pub fn setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Replace the sink of `level`.
    pub fn sink(self, level: Level, config: SinkConfig) -> Self {
        self.setting(Setting::Sink(level, config))
    }

    /// Replace the sinks of `Warning`, `Notice`, `Info`, `Debug` and `Trace`.
    pub fn group_default(self, config: SinkConfig) -> Self {
        self.setting(Setting::GroupDefault(config))
    }

    /// Replace the sinks of `Critical` and `Error`.
    pub fn error_group_default(self, config: SinkConfig) -> Self {
        self.setting(Setting::ErrorGroupDefault(config))
    }

    /// Replace the sinks of all seven levels.
    pub fn all_default(self, config: SinkConfig) -> Self {
        self.setting(Setting::AllDefault(config))
    }

    /// Replace the output of `level`'s sink, or of every sink for [`LevelFilter::All`].
    pub fn output(self, level: impl Into<LevelFilter>, output: Output) -> Self {
        self.setting(Setting::Output(level.into(), output))
    }

    /// Replace the label of `level`'s sink, or of every sink for [`LevelFilter::All`].
    pub fn label(self, level: impl Into<LevelFilter>, label: impl Into<String>) -> Self {
        self.setting(Setting::Label(level.into(), label.into()))
    }

    /// Replace the flags of `level`'s sink, or of every sink for [`LevelFilter::All`].
    pub fn flags(self, level: impl Into<LevelFilter>, flags: Flags) -> Self {
        self.setting(Setting::Flags(level.into(), flags))
    }

    /// Set the filter level.
    pub fn level(self, level: impl Into<LevelFilter>) -> Self {
        self.setting(Setting::Level(level.into()))
    }

    /// Set the filter level by name. An unknown name leaves the level unchanged.
    pub fn level_name(self, name: impl Into<String>) -> Self {
        self.setting(Setting::LevelName(name.into()))
    }

    /// Set the filter level from the environment variable `key`, if it is set to a level name.
    ///
    /// ```rust
    /// let logger = logladder::builder()
    ///     .level_from_env("MY_APP_LOG_LEVEL_THAT_IS_NOT_SET")
    ///     .build();
    /// assert_eq!(logger.level(), logladder::LevelFilter::Info);
    /// ```
    pub fn level_from_env(self, key: impl AsRef<OsStr>) -> Self {
        match std::env::var(key) {
            Ok(name) => self.level_name(name),
            Err(_) => self,
        }
    }

    /// Build the [`LeveledLogger`].
    pub fn build(self) -> LeveledLogger {
        LeveledLogger::with(self.settings)
    }

    /// Build the logger and set it up as the global [`log`] logger.
    ///
    /// # Errors
    ///
    /// This function will fail if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn try_apply(self) -> Result<&'static LeveledLogger, Error> {
        self.build().try_install()
    }

    /// Build the logger and set it up as the global [`log`] logger.
    ///
    /// # Panics
    ///
    /// This function will panic if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn apply(self) -> &'static LeveledLogger {
        self.build().install()
    }
}
