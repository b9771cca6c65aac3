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

//! Line header flags.

use std::fmt;
use std::ops::BitOr;
use std::ops::BitOrAssign;

/// Flags controlling the header a [`LineLogger`](crate::LineLogger) writes before each message.
///
/// With every flag set except `MSG_PREFIX` and `LONG_FILE`, a line looks like:
///
/// ```text
/// INFO     2009/01/23 01:23:23.123123 main.rs:23: message
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    /// The date in the local time zone: `2009/01/23`.
    pub const DATE: Flags = Flags(1);
    /// The time in the local time zone: `01:23:23`.
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full caller path and line number: `/a/b/c/main.rs:23`.
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final path component and line number: `main.rs:23`. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Render date and time in UTC rather than the local time zone.
    pub const UTC: Flags = Flags(1 << 5);
    /// Move the label from the beginning of the line to just before the message.
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    /// `DATE | TIME`.
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);
    /// `DATE | TIME | MICROSECONDS`, used by every default sink.
    pub const DEFAULT: Flags = Flags(Self::STD.0 | Self::MICROSECONDS.0);

    const ALL_BITS: u32 = (1 << 7) - 1;

    /// No flags: the line is the label followed by the message.
    pub const fn empty() -> Flags {
        Flags(0)
    }

    /// The raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Convert raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u32) -> Flags {
        Flags(bits & Self::ALL_BITS)
    }

    /// Whether all flags in `other` are set.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag in `other` is set.
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Flags, &str); 7] = [
            (Flags::DATE, "DATE"),
            (Flags::TIME, "TIME"),
            (Flags::MICROSECONDS, "MICROSECONDS"),
            (Flags::LONG_FILE, "LONG_FILE"),
            (Flags::SHORT_FILE, "SHORT_FILE"),
            (Flags::UTC, "UTC"),
            (Flags::MSG_PREFIX, "MSG_PREFIX"),
        ];

        if self.is_empty() {
            return f.write_str("Flags(empty)");
        }

        let names = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>();
        write!(f, "Flags({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values_are_stable() {
        assert_eq!(Flags::DATE.bits(), 1);
        assert_eq!(Flags::TIME.bits(), 2);
        assert_eq!(Flags::MICROSECONDS.bits(), 4);
        assert_eq!(Flags::LONG_FILE.bits(), 8);
        assert_eq!(Flags::SHORT_FILE.bits(), 16);
        assert_eq!(Flags::UTC.bits(), 32);
        assert_eq!(Flags::MSG_PREFIX.bits(), 64);
        assert_eq!(Flags::DEFAULT.bits(), 7);
    }

    #[test]
    fn combine_and_query() {
        let mut flags = Flags::DATE | Flags::UTC;
        assert!(flags.contains(Flags::DATE));
        assert!(!flags.contains(Flags::TIME));
        assert!(flags.intersects(Flags::TIME | Flags::DATE));
        assert!(!flags.intersects(Flags::TIME | Flags::MICROSECONDS));
        flags |= Flags::TIME;
        assert!(flags.contains(Flags::STD));
        assert!(Flags::empty().is_empty());
        assert_eq!(Flags::from_bits_truncate(0xff), Flags::from_bits_truncate(0x7f));
    }

    #[test]
    fn debug_lists_names() {
        assert_eq!(
            format!("{:?}", Flags::DEFAULT),
            "Flags(DATE | TIME | MICROSECONDS)"
        );
        assert_eq!(format!("{:?}", Flags::empty()), "Flags(empty)");
    }
}
