//! # Flags Register
//!
//! ```text
//!  7 6 5 4 3 2 1 0
//! ┌─┬─┬─┬─┬─┬─┬─┬─┐
//! │0│0│0│0│0│L│G│E│
//! └─┴─┴─┴─┴─┴─┴─┴─┘
//! ```
//!
//! Only `CMP` writes the flags, only the conditional jumps read them.
//! See [`condition`](super::condition) for how they are tested.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::condition::Condition;

const BIT_EQUAL: u8 = 0;
const BIT_GREATER: u8 = 1;
const BIT_LESS: u8 = 2;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags(u8);

impl Flags {
    /// Records the outcome of `a.cmp(b)`, clearing the other two flags.
    #[must_use]
    pub fn compared(ordering: Ordering) -> Self {
        let mut flags = Self::default();
        match ordering {
            Ordering::Less => flags.0.set_bit(BIT_LESS, true),
            Ordering::Greater => flags.0.set_bit(BIT_GREATER, true),
            Ordering::Equal => flags.0.set_bit(BIT_EQUAL, true),
        }
        flags
    }

    /// E => Bit 0
    #[must_use]
    pub fn equal(self) -> bool {
        self.0.get_bit(BIT_EQUAL)
    }

    /// G => Bit 1
    #[must_use]
    pub fn greater(self) -> bool {
        self.0.get_bit(BIT_GREATER)
    }

    /// L => Bit 2
    #[must_use]
    pub fn less(self) -> bool {
        self.0.get_bit(BIT_LESS)
    }

    #[must_use]
    pub fn satisfies(self, cond: Condition) -> bool {
        use Condition::{AL, EQ, GE, GT, LE, LT, NE};
        match cond {
            AL => true,
            EQ => self.equal(),
            NE => !self.equal(),
            GT => self.greater(),
            LT => self.less(),
            GE => self.greater() || self.equal(),
            LE => self.less() || self.equal(),
        }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}
