mod bitwise;

pub mod cpu;
pub mod error;
pub mod program;
