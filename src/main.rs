use std::{env, fs, io, process::ExitCode};

use emu::cpu::ls8::{Halt, Ls8};
use emu::error::LoadError;
use emu::program::Program;

use crate::config::Config;

mod config;
mod logging;

const EXIT_USAGE: u8 = 1;
const EXIT_FILE_NOT_FOUND: u8 = 2;
const EXIT_BAD_PROGRAM: u8 = 3;
const EXIT_FAULT: u8 = 4;

fn main() -> ExitCode {
    let config = Config::from_env();
    let _log_guard = logging::init(&config);

    let args = env::args().skip(1).collect::<Vec<String>>();
    let [path] = args.as_slice() else {
        eprintln!("usage: ls8 <program.ls8>");
        return ExitCode::from(EXIT_USAGE);
    };

    let program = match Program::from_file(path) {
        Ok(program) => program,
        Err(e @ LoadError::FileNotFound { .. }) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_FILE_NOT_FOUND);
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_BAD_PROGRAM);
        }
    };

    if tracing::enabled!(tracing::Level::DEBUG) {
        for line in program.disassemble() {
            tracing::debug!("{line}");
        }
    }

    let mut cpu = match Ls8::with_program(&program) {
        Ok(cpu) => cpu,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_BAD_PROGRAM);
        }
    };

    let halt = cpu.run(&mut io::stdout().lock());

    if let Some(path) = &config.dump_state {
        if let Err(e) = dump_state(&cpu, path) {
            tracing::warn!("could not write state to {}: {e}", path.display());
        }
    }

    match halt {
        Halt::Halted | Halt::UnknownOpcode { .. } => ExitCode::SUCCESS,
        Halt::Fault(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_FAULT)
        }
    }
}

fn dump_state(cpu: &Ls8, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(cpu)?;
    fs::write(path, json)?;
    Ok(())
}
