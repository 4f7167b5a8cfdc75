//! Octet API - Execution orchestration layer
//!
//! Provides unified execution interface, including:
//! - Program loading (whole file into memory)
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (OctetError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `run(program, output, &config)` API.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

use octet_core::{Interpreter, OpcodeDecoder};

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::OctetError;
pub use types::ExecuteOutput;

// Re-export config and core types
pub use octet_config;
pub use octet_config::{
    ConfigError, LimitConfig, LogLevel, LoggingConfig, OctetConfig, OpcodeTable, Phase,
    StallPolicy, VmConfig,
};
pub use octet_core::{Halt, Instruction, Line, Memory, Opcode, VmError};

/// 读取整个程序文件
#[instrument(target = "octet::loader", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<u8>, OctetError> {
    let path = path.as_ref();
    let program = fs::read(path).map_err(|source| OctetError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    info!(target: "octet::loader", bytes = program.len(), "Program loaded");
    Ok(program)
}

/// 读取并解析 JSON 配置文件
#[instrument(target = "octet::loader", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config(path: impl AsRef<Path>) -> Result<OctetConfig, OctetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| OctetError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = OctetConfig::from_json_str(&text)?;
    debug!(target: "octet::loader", ?config, "Config loaded");
    Ok(config)
}

/// Execute with explicit configuration
///
/// PRINT 输出写入 `output`，每个字节后立即刷新。
/// 未知操作码、步数上限、停滞停机都以 `Ok` 返回，由调用方根据 `halt` 判断。
pub fn run<W: Write>(
    program: Vec<u8>,
    output: W,
    config: &RunConfig,
) -> Result<ExecuteOutput, OctetError> {
    info!(target: "octet::vm", bytes = program.len(), "Starting execution");

    if config.dump_listing {
        let listing = disassemble(&program, config)?;
        for line in &listing {
            debug!(target: "octet::vm", "{line}");
        }
    }

    let mut vm = Interpreter::with_config(program, output, &config.vm)?;
    let halt = vm.run()?;
    let steps = vm.steps();
    let (memory, ip, _) = vm.into_parts();

    info!(target: "octet::vm", %halt, steps, "Execution completed");
    Ok(ExecuteOutput {
        halt,
        ip,
        steps,
        memory: memory.into_bytes(),
    })
}

/// 执行并把 PRINT 输出写到标准输出
pub fn run_to_stdout(program: Vec<u8>, config: &RunConfig) -> Result<ExecuteOutput, OctetError> {
    let stdout = io::stdout();
    run(program, stdout.lock(), config)
}

/// 执行并捕获 PRINT 输出
pub fn run_captured(
    program: Vec<u8>,
    config: &RunConfig,
) -> Result<(ExecuteOutput, Vec<u8>), OctetError> {
    let mut captured = Vec::new();
    let output = run(program, &mut captured, config)?;
    Ok((output, captured))
}

/// 静态反汇编
pub fn disassemble(program: &[u8], config: &RunConfig) -> Result<Vec<Line>, OctetError> {
    let decoder = OpcodeDecoder::new(&config.vm.opcodes)?;
    Ok(octet_core::disassemble(&Memory::from(program), &decoder))
}

// ==================== Global-config API ====================

/// Quick run with default config (auto-initializes if needed)
pub fn quick_run(program: Vec<u8>) -> Result<(ExecuteOutput, Vec<u8>), OctetError> {
    run_captured(program, config::get_or_init_default())
}
