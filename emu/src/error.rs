//! # Machine Errors
//!
//! Two families of errors exist:
//!
//! - [`LoadError`]: the program text could not be turned into memory contents.
//! - [`Error`]: something went wrong while decoding or executing an instruction.
//!
//! Arithmetic overflow is not an error: every register write wraps to 8 bits.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cpu::instruction::Instruction;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding or executing instructions.
///
/// Execute-time errors never leave state half written: the instruction that
/// failed has not committed its destination write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The byte under the program counter is not in the instruction table.
    #[error("unknown opcode {opcode:#010b}")]
    UnknownOpcode { opcode: u8 },

    /// A read or write targeted an address outside of the 256 memory cells.
    #[error("memory address {address:#04X} is out of range")]
    MemoryAddressOutOfRange { address: usize },

    /// An operand named a register outside of R0-R7.
    #[error("register index {0} is out of range")]
    RegisterIndexOutOfRange(u8),

    /// POP or RET with an empty stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// PUSH or CALL would move the stack pointer below `limit`.
    #[error("stack overflow: stack would grow below {limit:#04X}")]
    StackOverflow { limit: u8 },

    #[error("division by zero")]
    DivideByZero,

    /// A non ALU instruction was handed to the ALU.
    #[error("unsupported ALU operation {0}")]
    UnsupportedOperation(Instruction),

    /// PRN could not write to its output.
    #[error("failed to write output: {0}")]
    Output(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Output(err.to_string())
    }
}

/// Errors raised while loading a program.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `line` is 1-based, `text` is the literal without its comment.
    #[error("line {line}: `{text}` is not an 8-bit binary literal")]
    MalformedLiteral { line: usize, text: String },

    #[error("program is {len} bytes long but memory holds {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },
}
