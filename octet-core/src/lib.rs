//! Octet Core - Core interpreter (pure logic, no file IO)
//!
//! Contains the execution memory, the opcode table, the seven opcode
//! handlers, the fetch-decode-execute loop and a static disassembler.
//! Program bytes come in as an in-memory buffer; PRINT output goes to an
//! injected `std::io::Write`.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod disasm;
pub mod error;
pub mod memory;
pub mod opcode;
pub mod vm;

// Re-export common types
pub use disasm::{disassemble, DecodeError, Instruction, Line};
pub use error::{Halt, VmError};
pub use memory::Memory;
pub use opcode::{Opcode, OpcodeDecoder};
pub use vm::{Interpreter, State, Step};

// Re-export config types from octet-config
pub use octet_config::{LimitConfig, OpcodeTable, Phase, StallPolicy, VmConfig};
