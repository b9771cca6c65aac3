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

//! Sink configuration and the settings a [`LeveledLogger`](crate::LeveledLogger) is built from.

use crate::Flags;
use crate::Level;
use crate::LevelFilter;
use crate::append::Output;
use crate::record::LEVELS;

/// The output, label and flags of one level's [`LineLogger`](crate::LineLogger).
///
/// # Examples
///
/// ```
/// use logladder::Flags;
/// use logladder::SinkConfig;
/// use logladder::append::Output;
///
/// let config = SinkConfig::new(Output::Stderr)
///     .label("worker ")
///     .flags(Flags::STD | Flags::SHORT_FILE);
/// ```
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Where lines are written.
    pub output: Output,
    /// Text written at the start of every line, or before the message with
    /// [`Flags::MSG_PREFIX`].
    pub label: String,
    /// Header flags.
    pub flags: Flags,
    /// Color of the label.
    #[cfg(feature = "colored")]
    pub color: Option<colored::Color>,
}

impl SinkConfig {
    /// A configuration with an empty label and [`Flags::DEFAULT`].
    pub fn new(output: Output) -> Self {
        Self {
            output,
            label: String::new(),
            flags: Flags::DEFAULT,
            #[cfg(feature = "colored")]
            color: None,
        }
    }

    /// The configuration a fresh [`LeveledLogger`](crate::LeveledLogger) uses for `level`:
    /// standard error for `Critical` and `Error`, standard output otherwise, the padded level
    /// name as label and [`Flags::DEFAULT`].
    pub fn default_for(level: Level) -> Self {
        let output = match level {
            Level::Critical | Level::Error => Output::Stderr,
            _ => Output::Stdout,
        };
        Self::new(output).label(level.label())
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the flags.
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the output.
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Set the color of the label.
    #[cfg(feature = "colored")]
    pub fn color(mut self, color: colored::Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// One configuration change of a [`LeveledLogger`](crate::LeveledLogger).
///
/// Settings passed at construction are applied in order, so a later setting wins over an earlier
/// one touching the same level. [`LeveledLogger::apply`](crate::LeveledLogger::apply) runs the
/// very same change on a live logger.
///
/// # Examples
///
/// ```
/// use logladder::LeveledLogger;
/// use logladder::LevelFilter;
/// use logladder::Setting;
/// use logladder::SinkConfig;
/// use logladder::append::Output;
///
/// let logger = LeveledLogger::with([
///     Setting::AllDefault(SinkConfig::new(Output::Testing)),
///     Setting::Level(LevelFilter::Debug),
/// ]);
/// assert_eq!(logger.level(), LevelFilter::Debug);
/// ```
#[derive(Debug, Clone)]
pub enum Setting {
    /// Replace the sink of a single level.
    Sink(Level, SinkConfig),
    /// Replace the sinks of `Warning`, `Notice`, `Info`, `Debug` and `Trace`.
    GroupDefault(SinkConfig),
    /// Replace the sinks of `Critical` and `Error`.
    ErrorGroupDefault(SinkConfig),
    /// Replace the sinks of all seven levels.
    AllDefault(SinkConfig),
    /// Replace only the output of a level's sink, or of every sink for [`LevelFilter::All`].
    Output(LevelFilter, Output),
    /// Replace only the label of a level's sink, or of every sink for [`LevelFilter::All`].
    Label(LevelFilter, String),
    /// Replace only the flags of a level's sink, or of every sink for [`LevelFilter::All`].
    Flags(LevelFilter, Flags),
    /// Set the filter level.
    Level(LevelFilter),
    /// Set the filter level by name. Unknown names leave the level unchanged.
    LevelName(String),
}

impl Setting {
    /// The levels whose sinks this setting touches, most severe first.
    pub fn targets(&self) -> &'static [Level] {
        match self {
            Setting::Sink(level, _) => level_slice(*level),
            Setting::GroupDefault(_) => &LEVELS[Level::Warning as usize..],
            Setting::ErrorGroupDefault(_) => &LEVELS[..=Level::Error as usize],
            Setting::AllDefault(_) => &LEVELS,
            Setting::Output(filter, _) | Setting::Label(filter, _) | Setting::Flags(filter, _) => {
                filter_slice(*filter)
            }
            Setting::Level(_) | Setting::LevelName(_) => &[],
        }
    }
}

fn level_slice(level: Level) -> &'static [Level] {
    let index = level.index();
    &LEVELS[index..=index]
}

fn filter_slice(filter: LevelFilter) -> &'static [Level] {
    match filter.level() {
        Some(level) => level_slice(level),
        None => &LEVELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_route_errors_to_stderr() {
        for level in Level::iter() {
            let config = SinkConfig::default_for(level);
            let expected = if level <= Level::Error {
                Output::Stderr
            } else {
                Output::Stdout
            };
            assert_eq!(config.output, expected, "{level}");
            assert_eq!(config.label, level.label());
            assert_eq!(config.flags, Flags::DATE | Flags::TIME | Flags::MICROSECONDS);
        }
    }

    #[test]
    fn group_targets() {
        let config = SinkConfig::new(Output::Testing);
        assert_eq!(
            Setting::GroupDefault(config.clone()).targets(),
            [
                Level::Warning,
                Level::Notice,
                Level::Info,
                Level::Debug,
                Level::Trace
            ]
        );
        assert_eq!(
            Setting::ErrorGroupDefault(config.clone()).targets(),
            [Level::Critical, Level::Error]
        );
        assert_eq!(Setting::AllDefault(config.clone()).targets().len(), 7);
        assert_eq!(
            Setting::Sink(Level::Notice, config).targets(),
            [Level::Notice]
        );
        assert_eq!(
            Setting::Flags(LevelFilter::All, Flags::empty()).targets().len(),
            7
        );
        assert_eq!(
            Setting::Label(LevelFilter::Debug, String::new()).targets(),
            [Level::Debug]
        );
        assert!(Setting::Level(LevelFilter::All).targets().is_empty());
    }
}
