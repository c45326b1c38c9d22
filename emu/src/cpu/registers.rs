//! # LS-8 Register File
//!
//! Eight 8-bit general-purpose registers, `R0`-`R7`.
//!
//! - **R0-R4**: General purpose
//! - **R5**: Reserved as interrupt mask by convention (no interrupts here, so plain storage)
//! - **R6**: Reserved as interrupt status by convention (same as above)
//! - **R7 (SP)**: Stack pointer, starts at [`STACK_TOP`]
//!
//! Every write goes through [`wrap_byte`], so values always fit in 8 bits.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const REGISTER_COUNT: usize = 8;

/// Stack Pointer register index.
pub const REG_SP: u8 = 7;

/// Initial stack pointer, the stack grows down from here.
pub const STACK_TOP: u8 = 0xF4;

/// Truncates a wide result to the byte stored in a register.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn wrap_byte(value: u32) -> u8 {
    (value & 0xFF) as u8
}

/// The register file, indexed by the register number found in operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers([u8; REGISTER_COUNT]);

impl Default for Registers {
    fn default() -> Self {
        let mut registers = [0; REGISTER_COUNT];
        registers[REG_SP as usize] = STACK_TOP;
        Self(registers)
    }
}

impl Registers {
    pub fn register_at(&self, reg: u8) -> Result<u8> {
        self.0
            .get(usize::from(reg))
            .copied()
            .ok_or(Error::RegisterIndexOutOfRange(reg))
    }

    /// Stores the low 8 bits of `value`.
    pub fn set_register_at(&mut self, reg: u8, value: u32) -> Result<()> {
        let slot = self
            .0
            .get_mut(usize::from(reg))
            .ok_or(Error::RegisterIndexOutOfRange(reg))?;
        *slot = wrap_byte(value);
        Ok(())
    }

    #[must_use]
    pub const fn stack_pointer(&self) -> u8 {
        self.0[REG_SP as usize]
    }

    pub const fn set_stack_pointer(&mut self, sp: u8) {
        self.0[REG_SP as usize] = sp;
    }

    #[must_use]
    pub const fn as_array(&self) -> &[u8; REGISTER_COUNT] {
        &self.0
    }
}
