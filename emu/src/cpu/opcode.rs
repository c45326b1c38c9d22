use std::fmt::{Display, Formatter};

use crate::cpu::instruction::{Category, Instruction, InstructionInfo};
use crate::cpu::memory::Memory;
use crate::error::{Error, Result};

/// A fully decoded instruction: table entry plus its operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub info: InstructionInfo,
    pub raw: u8,
    operands: [u8; 2],
}

impl Opcode {
    /// Decodes the instruction starting at `pc`.
    ///
    /// Only the operand bytes the opcode declares are read, so a
    /// zero-operand instruction in the last memory cell decodes fine.
    pub fn decode(memory: &Memory, pc: usize) -> Result<Self> {
        let raw = memory.read_at(pc)?;
        let info = InstructionInfo::lookup(raw).ok_or(Error::UnknownOpcode { opcode: raw })?;

        let mut operands = [0; 2];
        for (i, operand) in operands
            .iter_mut()
            .take(usize::from(info.operand_count))
            .enumerate()
        {
            *operand = memory.read_at(pc + 1 + i)?;
        }

        Ok(Self {
            info,
            raw,
            operands,
        })
    }

    #[must_use]
    pub const fn instruction(&self) -> Instruction {
        self.info.instruction
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.info.category
    }

    /// The declared operands, in order.
    #[must_use]
    pub fn operands(&self) -> &[u8] {
        &self.operands[..usize::from(self.info.operand_count)]
    }

    /// First operand, 0 for instructions without operands.
    #[must_use]
    pub const fn operand_a(&self) -> u8 {
        self.operands[0]
    }

    /// Second operand. Single-operand instructions reuse the first one, so
    /// `NOT R2` complements R2 in place.
    #[must_use]
    pub const fn operand_b(&self) -> u8 {
        if self.info.operand_count < 2 {
            self.operands[0]
        } else {
            self.operands[1]
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.instruction())?;

        match (self.instruction(), self.operands()) {
            (_, []) => Ok(()),
            (Instruction::LDI, [reg, immediate]) => write!(f, " R{reg},{immediate}"),
            (_, [reg]) => write!(f, " R{reg}"),
            (_, [reg_a, reg_b]) => write!(f, " R{reg_a},R{reg_b}"),
            _ => unreachable!("instructions carry at most two operands"),
        }
    }
}
