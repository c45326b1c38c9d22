use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cpu::alu::{self, AluOp};
use crate::cpu::condition::Condition;
use crate::cpu::flags::Flags;
use crate::cpu::instruction::{Category, Instruction};
use crate::cpu::memory::{MEMORY_SIZE, Memory};
use crate::cpu::opcode::Opcode;
use crate::cpu::registers::Registers;
use crate::cpu::stack;
use crate::cpu::trace::Trace;
use crate::error::{Error, LoadError, Result};
use crate::program::Program;

/// Why the CPU stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// `HLT` was executed.
    Halted,

    /// The byte at `pc` is not an instruction. The trace has been written.
    UnknownOpcode { opcode: u8, pc: usize },

    /// An instruction failed; nothing was committed for it.
    Fault(Error),
}

/// The LS-8 CPU together with the memory it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ls8 {
    pub memory: Memory,
    pub registers: Registers,
    pub flags: Flags,

    /// Address of the next instruction to fetch.
    pub pc: usize,

    /// Instruction register, the last fetched opcode.
    pub ir: u8,

    /// Lowest address the stack may grow into.
    stack_limit: u8,
    running: bool,
    cycles: u64,
}

impl Default for Ls8 {
    fn default() -> Self {
        Self {
            memory: Memory::default(),
            registers: Registers::default(),
            flags: Flags::default(),
            pc: 0,
            ir: 0,
            stack_limit: 0,
            running: true,
            cycles: 0,
        }
    }
}

impl Ls8 {
    /// A fresh CPU with `program` loaded at address 0.
    pub fn with_program(program: &Program) -> std::result::Result<Self, LoadError> {
        let mut cpu = Self::default();
        cpu.load(program)?;
        Ok(cpu)
    }

    /// Copies `program` to address 0 and keeps the stack out of it.
    pub fn load(&mut self, program: &Program) -> std::result::Result<(), LoadError> {
        let too_large = || LoadError::ProgramTooLarge {
            len: program.len(),
            capacity: MEMORY_SIZE,
        };

        self.memory.load(program.bytes()).map_err(|_| too_large())?;
        // A program filling every cell leaves no room for the stack.
        self.stack_limit = u8::try_from(program.len()).unwrap_or(u8::MAX);

        tracing::debug!(
            "program of {} bytes loaded, stack limit {:#04X}",
            program.len(),
            self.stack_limit
        );
        Ok(())
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Number of instructions executed so far.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn fetch(&self) -> Result<u8> {
        self.memory.read_at(self.pc)
    }

    pub fn decode(&self) -> Result<Opcode> {
        let opcode = Opcode::decode(&self.memory, self.pc)?;
        tracing::trace!("{:02X}: {opcode}", self.pc);
        Ok(opcode)
    }

    /// Runs `opcode` and returns the next program counter.
    ///
    /// All reads happen before the first write, so an error leaves the
    /// machine as it was before the instruction.
    pub fn execute<W: Write>(&mut self, opcode: &Opcode, out: &mut W) -> Result<usize> {
        let next = self.pc + opcode.info.width();

        match opcode.category() {
            Category::Alu => {
                let op = AluOp::try_from(opcode.instruction())?;
                let outcome = alu::apply(
                    op,
                    opcode.operand_a(),
                    opcode.operand_b(),
                    &self.registers,
                    self.flags,
                )?;
                self.registers = outcome.registers;
                self.flags = outcome.flags;
                Ok(next)
            }
            Category::Control => self.control_flow(opcode, next),
            Category::Simple => {
                self.simple(opcode, out)?;
                // HLT leaves PC on itself.
                Ok(if self.running { next } else { self.pc })
            }
        }
    }

    fn control_flow(&mut self, opcode: &Opcode, next: usize) -> Result<usize> {
        match opcode.instruction() {
            Instruction::CALL => {
                let target = self.registers.register_at(opcode.operand_a())?;
                let return_address = u8::try_from(next)
                    .map_err(|_| Error::MemoryAddressOutOfRange { address: next })?;
                stack::push(
                    &mut self.memory,
                    &mut self.registers,
                    self.stack_limit,
                    return_address,
                )?;
                Ok(usize::from(target))
            }
            Instruction::RET => {
                let return_address = stack::pop(&self.memory, &mut self.registers)?;
                Ok(usize::from(return_address))
            }
            jump => {
                let cond = Condition::of_jump(jump).ok_or(Error::UnsupportedOperation(jump))?;
                let target = self.registers.register_at(opcode.operand_a())?;

                if self.flags.satisfies(cond) {
                    Ok(usize::from(target))
                } else {
                    Ok(next)
                }
            }
        }
    }

    fn simple<W: Write>(&mut self, opcode: &Opcode, out: &mut W) -> Result<()> {
        let reg_a = opcode.operand_a();
        let reg_b = opcode.operand_b();

        match opcode.instruction() {
            Instruction::NOP => {}
            Instruction::HLT => self.running = false,
            Instruction::LDI => self.registers.set_register_at(reg_a, u32::from(reg_b))?,
            Instruction::LD => {
                let address = self.registers.register_at(reg_b)?;
                let value = self.memory.read_at(usize::from(address))?;
                self.registers.set_register_at(reg_a, u32::from(value))?;
            }
            Instruction::ST => {
                let address = self.registers.register_at(reg_a)?;
                let value = self.registers.register_at(reg_b)?;
                self.memory.write_at(usize::from(address), value)?;
            }
            Instruction::PRN => {
                let value = self.registers.register_at(reg_a)?;
                writeln!(out, "{value}")?;
            }
            Instruction::PUSH => {
                let value = self.registers.register_at(reg_a)?;
                stack::push(
                    &mut self.memory,
                    &mut self.registers,
                    self.stack_limit,
                    value,
                )?;
            }
            Instruction::POP => {
                // Validate the destination before moving the stack pointer.
                self.registers.register_at(reg_a)?;
                let value = stack::pop(&self.memory, &mut self.registers)?;
                self.registers.set_register_at(reg_a, u32::from(value))?;
            }
            other => return Err(Error::UnsupportedOperation(other)),
        }
        Ok(())
    }

    /// One fetch-decode-execute cycle.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.ir = self.fetch()?;
        let opcode = self.decode()?;
        let next = self.execute(&opcode, out)?;

        self.pc = next;
        self.cycles += 1;
        Ok(())
    }

    /// Runs until `HLT`, an unknown opcode, or a fault.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Halt {
        while self.running {
            match self.step(out) {
                Ok(()) => {}
                Err(Error::UnknownOpcode { opcode }) => {
                    self.running = false;
                    let trace = self.trace();
                    tracing::warn!("unknown opcode {opcode:#010b} at {:#04X}", self.pc);
                    if let Err(err) = writeln!(out, "{trace}") {
                        return Halt::Fault(err.into());
                    }
                    return Halt::UnknownOpcode {
                        opcode,
                        pc: self.pc,
                    };
                }
                Err(err) => {
                    self.running = false;
                    tracing::error!("fault at {:#04X}: {err}", self.pc);
                    return Halt::Fault(err);
                }
            }
        }

        tracing::debug!("halted after {} cycles", self.cycles);
        Halt::Halted
    }

    /// Snapshot of PC, flags, the three cells at PC and all registers.
    #[must_use]
    pub fn trace(&self) -> Trace {
        let cell = |offset| self.memory.read_at(self.pc + offset).ok();

        Trace {
            pc: self.pc,
            flags: self.flags.bits(),
            memory: [cell(0), cell(1), cell(2)],
            registers: *self.registers.as_array(),
        }
    }
}
