pub mod alu;
pub mod condition;
pub mod flags;
pub mod instruction;
pub mod ls8;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod stack;
pub mod trace;
