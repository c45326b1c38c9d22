//! # Program Loading
//!
//! Programs are text files with one memory cell per line:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```
//!
//! Everything after `#` is a comment, blank lines are skipped and the
//! remaining binary literals fill memory from address 0.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::cpu::memory::{MEMORY_SIZE, Memory};
use crate::cpu::opcode::Opcode;
use crate::error::LoadError;

/// Bytes ready to be copied into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(LoadError::ProgramTooLarge {
                len: bytes.len(),
                capacity: MEMORY_SIZE,
            });
        }
        Ok(Self { bytes })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let program: Self = source.parse()?;
        tracing::debug!(
            "loaded {} bytes from {}",
            program.bytes.len(),
            path.display()
        );
        Ok(program)
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// One line per instruction: address, raw bytes, mnemonic.
    ///
    /// Bytes that do not decode are listed as `DB 0xNN` and the walk
    /// resumes on the next byte.
    #[must_use]
    pub fn disassemble(&self) -> Vec<String> {
        let mut memory = Memory::default();
        if memory.load(&self.bytes).is_err() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        let mut pc = 0;
        while pc < self.bytes.len() {
            let (width, text) = match Opcode::decode(&memory, pc) {
                Ok(opcode) => (opcode.info.width(), opcode.to_string()),
                Err(_) => (1, format!("DB {:#04X}", self.bytes[pc])),
            };

            let end = (pc + width).min(self.bytes.len());
            let raw = self.bytes[pc..end]
                .iter()
                .map(|byte| format!("{byte:02X}"))
                .collect::<Vec<_>>()
                .join(" ");

            lines.push(format!("{pc:02X}: {raw:<8}  {text}"));
            pc += width;
        }
        lines
    }
}

impl FromStr for Program {
    type Err = LoadError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut bytes = Vec::new();

        for (idx, line) in source.lines().enumerate() {
            let literal = line.split_once('#').map_or(line, |(code, _)| code).trim();
            if literal.is_empty() {
                continue;
            }

            bytes.push(parse_literal(literal).ok_or_else(|| LoadError::MalformedLiteral {
                line: idx + 1,
                text: literal.to_string(),
            })?);
        }

        Self::from_bytes(bytes)
    }
}

fn parse_literal(literal: &str) -> Option<u8> {
    let is_binary = literal.len() <= 8 && literal.chars().all(|c| c == '0' || c == '1');
    if !is_binary {
        return None;
    }
    u8::from_str_radix(literal, 2).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRINT8: &str = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";

    #[test]
    fn skips_comments_and_blank_lines() {
        let program: Program = PRINT8.parse().unwrap();

        assert_eq!(
            program.bytes(),
            &[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]
        );
    }

    #[test]
    fn accepts_surrounding_whitespace_and_short_literals() {
        let program: Program = "  101  \n\t11111111\t#max\n".parse().unwrap();

        assert_eq!(program.bytes(), &[5, 255]);
    }

    #[test]
    fn malformed_literal_reports_line() {
        let err = "00000001\n10000002 # bad\n".parse::<Program>().unwrap_err();

        assert!(matches!(
            err,
            LoadError::MalformedLiteral { line: 2, ref text } if text == "10000002"
        ));
    }

    #[test]
    fn rejects_too_many_digits_and_signs() {
        assert!("100000000".parse::<Program>().is_err());
        assert!("+1".parse::<Program>().is_err());
        assert!("0b1".parse::<Program>().is_err());
    }

    #[test]
    fn rejects_programs_larger_than_memory() {
        let source = "00000000\n".repeat(MEMORY_SIZE + 1);
        let err = source.parse::<Program>().unwrap_err();

        assert!(matches!(
            err,
            LoadError::ProgramTooLarge { len: 257, capacity: 256 }
        ));
    }

    #[test]
    fn missing_file() {
        let err = Program::from_file("/definitely/not/here.ls8").unwrap_err();

        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn disassembly_listing() {
        let program: Program = PRINT8.parse().unwrap();

        assert_eq!(
            program.disassemble(),
            vec![
                "00: 82 00 08  LDI R0,8".to_string(),
                "03: 47 00     PRN R0".to_string(),
                "05: 01        HLT".to_string(),
            ]
        );
    }

    #[test]
    fn disassembly_of_unknown_bytes() {
        let program = Program::from_bytes(vec![0xFF, 0b0000_0001]).unwrap();

        assert_eq!(
            program.disassemble(),
            vec!["00: FF        DB 0xFF".to_string(), "01: 01        HLT".to_string()]
        );
    }

    #[test]
    fn comment_only_program_is_empty() {
        let program: Program = "# only a comment\n\n".parse().unwrap();

        assert!(program.is_empty());
        assert_eq!(program.disassemble(), Vec::<String>::new());
    }
}
