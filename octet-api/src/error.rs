//! API 错误类型
//!
//! 把各层错误统一为 `OctetError`。

use octet_config::ConfigError;
use octet_core::VmError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Octet 错误类型
#[derive(Error, Debug)]
pub enum OctetError {
    /// 无法读取程序文件
    #[error("cannot read program '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 无法读取配置文件
    #[error("cannot read config '{}': {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 配置无效
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 运行时错误
    #[error("Runtime error: {0}")]
    Runtime(VmError),
}

impl From<VmError> for OctetError {
    fn from(e: VmError) -> Self {
        match e {
            VmError::Config(e) => OctetError::Config(e),
            other => OctetError::Runtime(other),
        }
    }
}

impl OctetError {
    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            OctetError::Load { .. } => "loader",
            OctetError::ConfigFile { .. } | OctetError::Config(_) => "config",
            OctetError::Runtime(_) => "vm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octet_config::OpcodeTable;

    #[test]
    fn test_vm_config_error_is_flattened() {
        let table = OpcodeTable {
            add: 0x00,
            ..OpcodeTable::default()
        };
        let vm_error = VmError::Config(table.validate().unwrap_err());
        let error = OctetError::from(vm_error);
        assert!(matches!(error, OctetError::Config(ConfigError::DuplicateTag { .. })));
        assert_eq!(error.phase(), "config");
    }

    #[test]
    fn test_load_error_display() {
        let error = OctetError::Load {
            path: PathBuf::from("missing.bin"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "cannot read program 'missing.bin': not found");
        assert_eq!(error.phase(), "loader");
    }

    #[test]
    fn test_runtime_error_phase() {
        let error = OctetError::from(VmError::Output {
            offset: 3,
            source: io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
        });
        assert_eq!(error.phase(), "vm");
        assert!(error.to_string().starts_with("Runtime error:"));
    }
}
