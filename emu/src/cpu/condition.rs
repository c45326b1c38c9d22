//! # Jump Conditions
//!
//! The conditional jumps test the flags left behind by the last `CMP`.
//! Exactly one of `L`, `G`, `E` is set after a compare, so each condition
//! reduces to a simple test:
//!
//! ```text
//! ┌──────┬────────┬──────────────────────┬──────────────┐
//! │ Jump │ Suffix │ Meaning              │ Flags tested │
//! ├──────┼────────┼──────────────────────┼──────────────┤
//! │ JMP  │   AL   │ Always               │ -            │
//! │ JEQ  │   EQ   │ Equal                │ E=1          │
//! │ JNE  │   NE   │ Not equal            │ E=0          │
//! │ JGT  │   GT   │ Greater than         │ G=1          │
//! │ JLT  │   LT   │ Less than            │ L=1          │
//! │ JGE  │   GE   │ Greater or equal     │ G=1 OR E=1   │
//! │ JLE  │   LE   │ Less or equal        │ L=1 OR E=1   │
//! └──────┴────────┴──────────────────────┴──────────────┘
//! ```
//!
//! Before any `CMP` all flags are clear: `JNE` jumps, `JEQ` does not.

use super::instruction::Instruction;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Condition {
    /// Always (unconditional `JMP`)
    AL,

    /// Equal (E=1)
    EQ,

    /// Not equal (E=0)
    NE,

    /// Greater than (G=1)
    GT,

    /// Less than (L=1)
    LT,

    /// Greater or equal (G=1 or E=1)
    GE,

    /// Less or equal (L=1 or E=1)
    LE,
}

impl Condition {
    /// The condition a jump instruction tests, `None` for anything else.
    #[must_use]
    pub const fn of_jump(instruction: Instruction) -> Option<Self> {
        use Instruction::{JEQ, JGE, JGT, JLE, JLT, JMP, JNE};
        match instruction {
            JMP => Some(Self::AL),
            JEQ => Some(Self::EQ),
            JNE => Some(Self::NE),
            JGT => Some(Self::GT),
            JLT => Some(Self::LT),
            JGE => Some(Self::GE),
            JLE => Some(Self::LE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn jumps_map_to_conditions() {
        assert_eq!(Condition::of_jump(Instruction::JMP), Some(Condition::AL));
        assert_eq!(Condition::of_jump(Instruction::JGE), Some(Condition::GE));
        assert_eq!(Condition::of_jump(Instruction::CALL), None);
        assert_eq!(Condition::of_jump(Instruction::ADD), None);
    }
}
