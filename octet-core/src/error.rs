//! 停机原因与运行时错误

use crate::opcode::Opcode;
use octet_config::ConfigError;
use std::fmt;
use std::io;
use thiserror::Error;

/// 停机原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// 执行到 END；`offset` 为 END 所在位置
    End { offset: usize },
    /// 取指时 `ip >= L`，属于正常结束
    OutOfBounds { ip: usize },
    /// 无法识别的操作码
    UnknownOpcode { opcode: u8, offset: usize },
    /// 达到 `max_steps` 上限（可选）
    StepLimit { steps: u64 },
    /// 处理器校验失败且策略为 `StallPolicy::Halt`（可选）
    Stalled { opcode: Opcode, offset: usize },
}

impl Halt {
    /// END 或缓冲区耗尽都算成功结束
    pub fn is_success(&self) -> bool {
        matches!(self, Halt::End { .. } | Halt::OutOfBounds { .. })
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::End { offset } => write!(f, "END at position {offset}"),
            Halt::OutOfBounds { ip } => write!(f, "ran off the end of memory at position {ip}"),
            Halt::UnknownOpcode { opcode, offset } => {
                write!(f, "Unknown opcode {opcode:02X} at position {offset}")
            }
            Halt::StepLimit { steps } => write!(f, "step limit reached after {steps} steps"),
            Halt::Stalled { opcode, offset } => {
                write!(f, "{opcode} at position {offset} failed validation and cannot advance")
            }
        }
    }
}

/// 运行时错误
#[derive(Error, Debug)]
pub enum VmError {
    /// PRINT 写出或刷新失败
    #[error("failed to emit output byte at position {offset}: {source}")]
    Output {
        offset: usize,
        #[source]
        source: io::Error,
    },

    /// 配置无效
    #[error(transparent)]
    Config(#[from] ConfigError),
}
