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

/// Print a formatted message through a [`LeveledLogger`](crate::LeveledLogger) at the given
/// [`Level`](crate::Level), if the logger's filter admits it.
///
/// ```
/// use logladder::Level;
///
/// let logger = logladder::LeveledLogger::new();
/// logladder::log!(logger, Level::Trace, "filtered out: {}", 1);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Critical`](crate::Level::Critical).
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.criticalf(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Warning`](crate::Level::Warning).
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Notice`](crate::Level::Notice).
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $logger.noticef(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message at [`Level::Trace`](crate::Level::Trace).
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::std::format_args!($($arg)+))
    };
}

/// Print a formatted message to the critical sink regardless of the filter, then exit the
/// process with code 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}
