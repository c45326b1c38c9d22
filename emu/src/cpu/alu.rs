//! # Arithmetic Logic Unit
//!
//! [`apply`] is a pure function: it takes the current registers and flags and
//! returns the updated copies, leaving the caller to commit them. A failing
//! operation therefore never leaves a partial write behind.
//!
//! Results are computed on `u32` and truncated by
//! [`wrap_byte`](super::registers::wrap_byte) when stored, so ADD, SUB, MUL,
//! INC, DEC and SHL wrap modulo 256.

use crate::cpu::flags::Flags;
use crate::cpu::instruction::Instruction;
use crate::cpu::registers::Registers;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Cmp,
    And,
    Not,
    Or,
    Xor,
    Shl,
    Shr,
}

impl TryFrom<Instruction> for AluOp {
    type Error = Error;

    fn try_from(instruction: Instruction) -> Result<Self> {
        use AluOp::*;
        Ok(match instruction {
            Instruction::ADD => Add,
            Instruction::SUB => Sub,
            Instruction::MUL => Mul,
            Instruction::DIV => Div,
            Instruction::MOD => Mod,
            Instruction::INC => Inc,
            Instruction::DEC => Dec,
            Instruction::CMP => Cmp,
            Instruction::AND => And,
            Instruction::NOT => Not,
            Instruction::OR => Or,
            Instruction::XOR => Xor,
            Instruction::SHL => Shl,
            Instruction::SHR => Shr,
            other => return Err(Error::UnsupportedOperation(other)),
        })
    }
}

/// Registers and flags after an ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutcome {
    pub registers: Registers,
    pub flags: Flags,
}

/// Runs `op` with `reg_a` as destination (and left operand) and `reg_b` as
/// right operand.
///
/// NOT is the odd one out: `R[a] = !R[b]`. CMP only writes the flags, every
/// other operation only writes `R[a]`.
pub fn apply(
    op: AluOp,
    reg_a: u8,
    reg_b: u8,
    registers: &Registers,
    flags: Flags,
) -> Result<AluOutcome> {
    let a = u32::from(registers.register_at(reg_a)?);
    let b = u32::from(registers.register_at(reg_b)?);

    let result = match op {
        AluOp::Cmp => {
            return Ok(AluOutcome {
                registers: *registers,
                flags: Flags::compared(a.cmp(&b)),
            });
        }
        AluOp::Add => a + b,
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a * b,
        AluOp::Div => a.checked_div(b).ok_or(Error::DivideByZero)?,
        AluOp::Mod => a.checked_rem(b).ok_or(Error::DivideByZero)?,
        AluOp::Inc => a + 1,
        AluOp::Dec => a.wrapping_sub(1),
        AluOp::And => a & b,
        AluOp::Not => !b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Shl => a.checked_shl(b).unwrap_or(0),
        AluOp::Shr => a.checked_shr(b).unwrap_or(0),
    };

    let mut registers = *registers;
    registers.set_register_at(reg_a, result)?;

    Ok(AluOutcome { registers, flags })
}
