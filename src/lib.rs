//! Octet - a minimal self-modifying bytecode interpreter
//!
//! Code and data share one fixed-length byte buffer: instructions can
//! rewrite bytes that are later fetched as opcodes.
//!
//! # Architecture
//!
//! ```text
//! octet-config/  - Pure configuration data (opcode table, limits, logging)
//! octet-core/    - Execution memory, handlers, interpreter loop (no file IO)
//! octet-api/     - Loading, orchestration, unified errors
//! octet-cli/     - The `octet` binary
//! ```
//!
//! # Quick Start
//!
//! ```
//! use octet::{run_captured, Halt, RunConfig};
//!
//! let (output, stdout) = run_captured(vec![0x06, b'A', 0x00], &RunConfig::default()).unwrap();
//! assert_eq!(stdout, b"A");
//! assert_eq!(output.halt, Halt::End { offset: 2 });
//! ```

pub use octet_api::*;
