use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::error::{Error, Result};

/// Number of addressable cells.
pub const MEMORY_SIZE: usize = 0x100;

/// Flat byte-addressable RAM shared by program, data and stack.
///
/// There is no mirroring and no wrap-around: any address past
/// [`MEMORY_SIZE`] is rejected.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    #[serde_as(as = "Box<[_; 256]>")]
    cells: Box<[u8; MEMORY_SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: Box::new([0; MEMORY_SIZE]),
        }
    }
}

impl Memory {
    pub fn read_at(&self, address: usize) -> Result<u8> {
        self.cells
            .get(address)
            .copied()
            .ok_or(Error::MemoryAddressOutOfRange { address })
    }

    pub fn write_at(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(Error::MemoryAddressOutOfRange { address })?;
        *cell = value;
        Ok(())
    }

    /// Copies `bytes` starting at address 0.
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        let dst = self
            .cells
            .get_mut(..bytes.len())
            .ok_or(Error::MemoryAddressOutOfRange {
                address: MEMORY_SIZE,
            })?;
        dst.copy_from_slice(bytes);
        Ok(())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.cells.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_write_round_trip() {
        let mut memory = Memory::default();
        memory.write_at(0x00, 0x2A).unwrap();
        memory.write_at(0xFF, 0x99).unwrap();

        assert_eq!(memory.read_at(0x00), Ok(0x2A));
        assert_eq!(memory.read_at(0xFF), Ok(0x99));
        assert_eq!(memory.read_at(0x80), Ok(0));
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut memory = Memory::default();

        assert_eq!(
            memory.read_at(0x100),
            Err(Error::MemoryAddressOutOfRange { address: 0x100 })
        );
        assert_eq!(
            memory.write_at(0x1FF, 1),
            Err(Error::MemoryAddressOutOfRange { address: 0x1FF })
        );
    }

    #[test]
    fn load_copies_from_zero() {
        let mut memory = Memory::default();
        memory.load(&[1, 2, 3]).unwrap();

        assert_eq!(&memory.as_slice()[..4], &[1, 2, 3, 0]);
    }

    #[test]
    fn load_empty_program_leaves_memory_clear() {
        let mut memory = Memory::default();

        assert_eq!(memory.load(&[]), Ok(()));
        assert_eq!(memory, Memory::default());
    }

    #[test]
    fn load_rejects_oversized_program() {
        let mut memory = Memory::default();
        let program = vec![0; MEMORY_SIZE + 1];

        assert_eq!(
            memory.load(&program),
            Err(Error::MemoryAddressOutOfRange {
                address: MEMORY_SIZE
            })
        );
    }
}
