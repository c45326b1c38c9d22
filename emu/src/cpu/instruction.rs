//! # LS-8 Instruction Set
//!
//! Every instruction is one opcode byte followed by zero, one or two operand
//! bytes. The opcode layout makes the shape of an instruction a function of
//! its bits:
//!
//! ```text
//!  7 6   5   4   3 2 1 0
//! ┌───┬───┬───┬───────┐
//! │AA │ B │ C │ DDDD  │
//! └───┴───┴───┴───────┘
//!   │   │   │    └─ instruction identifier
//!   │   │   └─ 1 = sets the program counter (control flow)
//!   │   └─ 1 = handled by the ALU
//!   └─ number of operand bytes
//! ```
//!
//! [`OPCODE_TABLE`] maps every byte to its [`InstructionInfo`]; bytes that
//! are not listed decode to `None`.

use std::fmt::Display;

/// Mnemonics, with the opcode byte as discriminant.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Instruction {
    // ALU
    ADD = 0b1010_0000,
    SUB = 0b1010_0001,
    MUL = 0b1010_0010,
    DIV = 0b1010_0011,
    MOD = 0b1010_0100,
    INC = 0b0110_0101,
    DEC = 0b0110_0110,
    CMP = 0b1010_0111,
    AND = 0b1010_1000,
    NOT = 0b0110_1001,
    OR = 0b1010_1010,
    XOR = 0b1010_1011,
    SHL = 0b1010_1100,
    SHR = 0b1010_1101,

    // PC mutators
    CALL = 0b0101_0000,
    RET = 0b0001_0001,
    JMP = 0b0101_0100,
    JEQ = 0b0101_0101,
    JNE = 0b0101_0110,
    JGT = 0b0101_0111,
    JLT = 0b0101_1000,
    JLE = 0b0101_1001,
    JGE = 0b0101_1010,

    // Other
    NOP = 0b0000_0000,
    HLT = 0b0000_0001,
    LDI = 0b1000_0010,
    LD = 0b1000_0011,
    ST = 0b1000_0100,
    PUSH = 0b0100_0101,
    POP = 0b0100_0110,
    PRN = 0b0100_0111,
}

const INSTRUCTION_SET: [Instruction; 31] = {
    use Instruction::*;
    [
        ADD, SUB, MUL, DIV, MOD, INC, DEC, CMP, AND, NOT, OR, XOR, SHL, SHR, CALL, RET, JMP, JEQ,
        JNE, JGT, JLT, JLE, JGE, NOP, HLT, LDI, LD, ST, PUSH, POP, PRN,
    ]
};

impl Instruction {
    #[must_use]
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        use Instruction::*;
        match self {
            ADD => "ADD",
            SUB => "SUB",
            MUL => "MUL",
            DIV => "DIV",
            MOD => "MOD",
            INC => "INC",
            DEC => "DEC",
            CMP => "CMP",
            AND => "AND",
            NOT => "NOT",
            OR => "OR",
            XOR => "XOR",
            SHL => "SHL",
            SHR => "SHR",
            CALL => "CALL",
            RET => "RET",
            JMP => "JMP",
            JEQ => "JEQ",
            JNE => "JNE",
            JGT => "JGT",
            JLT => "JLT",
            JLE => "JLE",
            JGE => "JGE",
            NOP => "NOP",
            HLT => "HLT",
            LDI => "LDI",
            LD => "LD",
            ST => "ST",
            PUSH => "PUSH",
            POP => "POP",
            PRN => "PRN",
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// How the engine dispatches an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Computed by the ALU, PC then advances past the operands.
    Alu,

    /// Writes the program counter itself.
    Control,

    /// Everything else, PC advances past the operands.
    Simple,
}

/// Table entry: an instruction and the shape encoded in its opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionInfo {
    pub instruction: Instruction,
    pub category: Category,
    pub operand_count: u8,
}

impl InstructionInfo {
    const fn new(instruction: Instruction) -> Self {
        let opcode = instruction.opcode();
        let category = if opcode & 0b0010_0000 != 0 {
            Category::Alu
        } else if opcode & 0b0001_0000 != 0 {
            Category::Control
        } else {
            Category::Simple
        };

        Self {
            instruction,
            category,
            operand_count: opcode >> 6,
        }
    }

    /// Size in bytes of the whole instruction.
    #[must_use]
    pub const fn width(self) -> usize {
        1 + self.operand_count as usize
    }

    #[must_use]
    pub fn lookup(opcode: u8) -> Option<Self> {
        OPCODE_TABLE[usize::from(opcode)]
    }
}

pub static OPCODE_TABLE: [Option<InstructionInfo>; 256] = build_table();

const fn build_table() -> [Option<InstructionInfo>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < INSTRUCTION_SET.len() {
        let instruction = INSTRUCTION_SET[i];
        table[instruction.opcode() as usize] = Some(InstructionInfo::new(instruction));
        i += 1;
    }
    table
}
