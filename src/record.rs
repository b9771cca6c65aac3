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

//! Message levels and level filters.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Width of the default per-level label, e.g. `"INFO     "`.
pub const LABEL_WIDTH: usize = 9;

/// The severity of a message, from the most severe to the most verbose.
///
/// A message at `level` is admitted when the logger's [`LevelFilter`] is greater than or equal to
/// it, see [`LevelFilter::enables`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Designates conditions that require immediate attention.
    Critical = 0,
    /// Designates very serious errors.
    Error = 1,
    /// Designates hazardous situations.
    Warning = 2,
    /// Designates normal but significant conditions.
    Notice = 3,
    /// Designates useful information.
    Info = 4,
    /// Designates lower priority information.
    Debug = 5,
    /// Designates very low priority, often extremely verbose, information.
    Trace = 6,
}

// most severe first; `LEVELS[level as usize] == level`
pub(crate) static LEVELS: [Level; 7] = [
    Level::Critical,
    Level::Error,
    Level::Warning,
    Level::Notice,
    Level::Info,
    Level::Debug,
    Level::Trace,
];

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Notice => "NOTICE",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    /// The default label of this level: its name left-justified to [`LABEL_WIDTH`].
    ///
    /// ```
    /// use logladder::Level;
    ///
    /// assert_eq!(Level::Info.label(), "INFO     ");
    /// assert_eq!(Level::Critical.label(), "CRITICAL ");
    /// ```
    pub fn label(&self) -> String {
        format!("{:<width$}", self.as_str(), width = LABEL_WIDTH)
    }

    /// Iterate over all message levels, most severe first.
    pub fn iter() -> impl ExactSizeIterator<Item = Level> {
        LEVELS.into_iter()
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        let name = s.trim();
        Level::iter()
            .find(|level| name.eq_ignore_ascii_case(level.as_str()))
            .ok_or_else(|| Error::invalid_level(s))
    }
}

/// The threshold a logger compares message levels against.
///
/// It has one more variant than [`Level`]: [`LevelFilter::All`] admits every message, but it is
/// never the level of a message itself.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LevelFilter {
    /// Admits only [`Level::Critical`].
    Critical = 0,
    /// Admits [`Level::Error`] and more severe.
    Error = 1,
    /// Admits [`Level::Warning`] and more severe.
    Warning = 2,
    /// Admits [`Level::Notice`] and more severe.
    Notice = 3,
    /// Admits [`Level::Info`] and more severe.
    #[default]
    Info = 4,
    /// Admits [`Level::Debug`] and more severe.
    Debug = 5,
    /// Admits [`Level::Trace`] and more severe.
    Trace = 6,
    /// Admits everything.
    All = 7,
}

impl LevelFilter {
    const FILTERS: [LevelFilter; 8] = [
        LevelFilter::Critical,
        LevelFilter::Error,
        LevelFilter::Warning,
        LevelFilter::Notice,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
        LevelFilter::All,
    ];

    /// Return the string representation of the `LevelFilter`.
    pub fn as_str(&self) -> &'static str {
        match self.level() {
            Some(level) => level.as_str(),
            None => "ALL",
        }
    }

    /// All filter names from the most restrictive to the least restrictive.
    pub fn names() -> [&'static str; 8] {
        Self::FILTERS.map(|filter| filter.as_str())
    }

    /// [`LevelFilter::names`] joined with `", "`, for help texts.
    ///
    /// ```
    /// use logladder::LevelFilter;
    ///
    /// assert_eq!(
    ///     LevelFilter::joined_names(),
    ///     "CRITICAL, ERROR, WARNING, NOTICE, INFO, DEBUG, TRACE, ALL"
    /// );
    /// ```
    pub fn joined_names() -> String {
        Self::names().join(", ")
    }

    /// Convert a raw ordinal into a filter, `None` when out of range.
    pub fn from_ordinal(ordinal: u8) -> Option<LevelFilter> {
        Self::FILTERS.get(ordinal as usize).copied()
    }

    /// The ordinal of this filter, `0` for `Critical` up to `7` for `All`.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The message level with the same name, `None` for [`LevelFilter::All`].
    pub fn level(self) -> Option<Level> {
        LEVELS.get(self as usize).copied()
    }

    /// Whether a message at `level` passes this filter.
    ///
    /// ```
    /// use logladder::Level;
    /// use logladder::LevelFilter;
    ///
    /// assert!(LevelFilter::Info.enables(Level::Warning));
    /// assert!(LevelFilter::Info.enables(Level::Info));
    /// assert!(!LevelFilter::Info.enables(Level::Debug));
    /// assert!(LevelFilter::All.enables(Level::Trace));
    /// ```
    pub fn enables(self, level: Level) -> bool {
        level <= self
    }
}

impl fmt::Debug for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LevelFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<LevelFilter, Self::Err> {
        let name = s.trim();
        Self::FILTERS
            .into_iter()
            .find(|filter| name.eq_ignore_ascii_case(filter.as_str()))
            .ok_or_else(|| Error::invalid_level(s))
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        Self::FILTERS[level.index()]
    }
}

impl PartialEq<LevelFilter> for Level {
    fn eq(&self, other: &LevelFilter) -> bool {
        *self as u8 == *other as u8
    }
}

impl PartialOrd<LevelFilter> for Level {
    fn partial_cmp(&self, other: &LevelFilter) -> Option<Ordering> {
        Some((*self as u8).cmp(&(*other as u8)))
    }
}

impl PartialEq<Level> for LevelFilter {
    fn eq(&self, other: &Level) -> bool {
        other.eq(self)
    }
}

impl PartialOrd<Level> for LevelFilter {
    fn partial_cmp(&self, other: &Level) -> Option<Ordering> {
        Some((*self as u8).cmp(&(*other as u8)))
    }
}
