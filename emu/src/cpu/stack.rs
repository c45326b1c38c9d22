//! # Stack
//!
//! A descending stack in main memory, addressed by R7:
//!
//! ```text
//!  0x00            limit                 SP        0xF4      0xFF
//!  ┌───────────────┬─────────────────────┬─────────┬─────────┐
//!  │   program     │       free          │ pushed  │ reserved│
//!  └───────────────┴─────────────────────┴─────────┴─────────┘
//!                                        ◄── grows down
//! ```
//!
//! Push pre-decrements, pop post-increments. An empty stack has
//! `SP == STACK_TOP`; the stack may not grow below `limit`, which the CPU
//! sets to the end of the loaded program.

use crate::cpu::memory::Memory;
use crate::cpu::registers::{Registers, STACK_TOP};
use crate::error::{Error, Result};

/// Pushes `value` and returns the new stack pointer.
pub fn push(memory: &mut Memory, registers: &mut Registers, limit: u8, value: u8) -> Result<u8> {
    let sp = registers
        .stack_pointer()
        .checked_sub(1)
        .filter(|sp| *sp >= limit)
        .ok_or(Error::StackOverflow { limit })?;

    memory.write_at(usize::from(sp), value)?;
    registers.set_stack_pointer(sp);
    Ok(sp)
}

/// Pops the top of the stack.
pub fn pop(memory: &Memory, registers: &mut Registers) -> Result<u8> {
    let sp = registers.stack_pointer();
    if sp >= STACK_TOP {
        return Err(Error::StackUnderflow);
    }

    let value = memory.read_at(usize::from(sp))?;
    registers.set_stack_pointer(sp + 1);
    Ok(value)
}
