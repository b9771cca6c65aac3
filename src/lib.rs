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

//! Logladder adds levels to a plain line logger: seven ordered message levels, one output, label
//! and set of header flags per level, and one shared filter that can be changed at runtime from
//! any thread.
//!
//! # Overview
//!
//! A [`LeveledLogger`] owns one [`LineLogger`] per [`Level`], from the most severe `Critical`
//! down to `Trace`, and a [`LevelFilter`]. A message is written if and only if the filter is
//! greater than or equal to the message level; [`LevelFilter::All`] admits everything.
//!
//! By default the filter is `Info`, `Critical` and `Error` lines go to standard error and the
//! rest to standard output:
//!
//! ```text
//! INFO     2024/08/11 22:44:57.172105 listening on 0.0.0.0:8080
//! ERROR    2024/08/11 22:44:57.172219 connection reset
//! ```
//!
//! # Examples
//!
//! Simple setup with the default configuration:
//!
//! ```
//! let logger = logladder::LeveledLogger::new();
//!
//! logger.info("This is an info message.");
//! logladder::debug!(logger, "This is filtered out: {}", 42);
//! ```
//!
//! Advanced setup with custom sinks and a level from the environment:
//!
//! ```
//! use logladder::Flags;
//! use logladder::Level;
//! use logladder::LevelFilter;
//! use logladder::SinkConfig;
//! use logladder::append::Output;
//!
//! let logger = logladder::builder()
//!     .all_default(SinkConfig::new(Output::Testing).flags(Flags::STD | Flags::SHORT_FILE))
//!     .label(LevelFilter::All, "app ")
//!     .level_from_env("APP_LOG_LEVEL")
//!     .build();
//!
//! logger.set_level(Level::Debug);
//! logladder::debug!(logger, "Debug message.");
//!
//! // the handle bypasses the filter
//! logger.set_level(LevelFilter::Critical);
//! logger.sink(Level::Debug).print("Written anyway.");
//! ```
//!
//! # The `log` crate
//!
//! A `LeveledLogger` implements [`log::Log`], and [`LeveledLogger::install`] installs it as the
//! global logger. A single [`LineLogger`] implements [`log::Log`] as well and writes every record
//! it receives.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod record;

mod bridge;
mod config;
mod error;
mod flags;
mod line;
mod logger;
mod macros;

pub use config::Setting;
pub use config::SinkConfig;
pub use error::Error;
pub use error::ErrorKind;
pub use flags::Flags;
pub use line::Caller;
pub use line::LineLogger;
pub use logger::*;
pub use record::Level;
pub use record::LevelFilter;
