use std::fmt::{Display, Formatter};

use crate::cpu::registers::REGISTER_COUNT;

/// One-line dump of the machine state, printed when the CPU lands on an
/// opcode it does not know.
///
/// ```text
/// TRACE: PC | FL | M[PC] M[PC+1] M[PC+2] | R0 R1 R2 R3 R4 R5 R6 R7
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub pc: usize,
    pub flags: u8,
    /// `None` for cells past the end of memory.
    pub memory: [Option<u8>; 3],
    pub registers: [u8; REGISTER_COUNT],
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TRACE: {:02X} | {:02X} |", self.pc, self.flags)?;

        for cell in self.memory {
            match cell {
                Some(value) => write!(f, " {value:02X}")?,
                None => f.write_str(" --")?,
            }
        }

        f.write_str(" |")?;
        for value in self.registers {
            write!(f, " {value:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_as_upper_hex() {
        let trace = Trace {
            pc: 0x0A,
            flags: 0b001,
            memory: [Some(0xFF), Some(0x00), Some(0x2A)],
            registers: [0, 1, 2, 3, 4, 5, 0xAB, 0xF4],
        };

        assert_eq!(
            trace.to_string(),
            "TRACE: 0A | 01 | FF 00 2A | 00 01 02 03 04 05 AB F4"
        );
    }

    #[test]
    fn cells_past_memory_end() {
        let trace = Trace {
            pc: 0xFF,
            flags: 0,
            memory: [Some(0xEE), None, None],
            registers: [0; REGISTER_COUNT],
        };

        assert_eq!(
            trace.to_string(),
            "TRACE: FF | 00 | EE -- -- | 00 00 00 00 00 00 00 00"
        );
    }
}
