//! Octet Config - Pure configuration data structures
//!
//! This crate contains only data structures, no IO or global state.
//! It serves as the shared configuration vocabulary across all Octet crates.
//!
//! 所有结构都可以通过 serde 从 JSON 配置文件（默认 `octet.json`）反序列化，
//! 缺省字段使用 `Default` 中的值。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 两个操作码共用了同一个标签字节
    #[error("opcode tag 0x{tag:02X} is assigned to both {first} and {second}")]
    DuplicateTag {
        tag: u8,
        first: &'static str,
        second: &'static str,
    },

    /// JSON 解析失败
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 操作码标签表
///
/// 标签字节是外部约定；默认值见 `Default`。指令长度由行为契约固定，不可配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpcodeTable {
    pub end: u8,
    pub jmp: u8,
    pub swp: u8,
    pub add: u8,
    pub xor: u8,
    pub invert: u8,
    pub print: u8,
}

impl OpcodeTable {
    /// 按 (名称, 标签) 列出所有条目，顺序固定
    pub fn entries(&self) -> [(&'static str, u8); 7] {
        [
            ("END", self.end),
            ("JMP", self.jmp),
            ("SWP", self.swp),
            ("ADD", self.add),
            ("XOR", self.xor),
            ("INVERT", self.invert),
            ("PRINT", self.print),
        ]
    }

    /// 检查标签两两不同
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = self.entries();
        for (i, &(first, tag)) in entries.iter().enumerate() {
            if let Some(&(second, _)) = entries[i + 1..].iter().find(|(_, t)| *t == tag) {
                return Err(ConfigError::DuplicateTag { tag, first, second });
            }
        }
        Ok(())
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self {
            end: 0x00,
            jmp: 0x01,
            swp: 0x02,
            add: 0x03,
            xor: 0x04,
            invert: 0x05,
            print: 0x06,
        }
    }
}

/// Configuration for execution limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitConfig {
    /// Maximum number of executed fetch-decode-execute steps.
    ///
    /// `None` means unbounded, which is the faithful behavior: a program that
    /// jumps in a cycle or stalls runs forever.
    pub max_steps: Option<u64>,
}

/// 校验失败（停滞）时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StallPolicy {
    /// 原地重复取指，永不前进
    #[default]
    Spin,
    /// 第一次停滞即停机
    Halt,
}

/// Configuration for the virtual machine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VmConfig {
    pub opcodes: OpcodeTable,
    pub limits: LimitConfig,
    pub stall: StallPolicy,
}

impl VmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.opcodes.validate()
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// 解析日志级别字符串（大小写不敏感）；`silent` 视为 `error`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// 全局默认级别
    pub level: LogLevel,
    /// Loader 级别（None 表示使用 level）
    pub loader: Option<LogLevel>,
    /// VM 级别（None 表示使用 level）
    pub vm: Option<LogLevel>,
}

impl LoggingConfig {
    /// 获取指定阶段的实际日志级别
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        let specific = match phase {
            Phase::Loader => self.loader,
            Phase::Vm => self.vm,
            Phase::Cli => None,
        };
        specific.unwrap_or(self.level)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            loader: None,
            vm: None,
        }
    }
}

/// 配置文件顶层结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OctetConfig {
    pub vm: VmConfig,
    pub log: LoggingConfig,
}

impl OctetConfig {
    /// 从 JSON 文本解析并校验
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: OctetConfig = serde_json::from_str(text)?;
        config.vm.validate()?;
        Ok(config)
    }
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loader,
    Vm,
    Cli,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loader => "loader",
            Phase::Vm => "vm",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("octet::{}", self.as_str())
    }
}
