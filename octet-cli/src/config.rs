//! CLI 配置
//!
//! 包含 CLI 特有的配置：日志配置（按 target 分级）

use octet_api::{LogLevel, LoggingConfig, Phase};
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub loader: Level,
    pub vm: Level,
}

impl LogConfig {
    /// 由配置文件的日志段、`-v` 次数和 `--log-vm` 合成
    ///
    /// `-v` 只会提高各阶段的级别，不会降低配置文件中的设置；
    /// `--log-vm` 直接覆盖 VM 级别。
    pub fn resolve(file: &LoggingConfig, verbosity: u8, vm_override: Option<LogLevel>) -> Self {
        let from_flags = match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        let phase_level = |phase: Phase| file.level_for(phase).max(from_flags);
        Self {
            global: to_tracing(phase_level(Phase::Cli)),
            loader: to_tracing(phase_level(Phase::Loader)),
            vm: to_tracing(vm_override.unwrap_or_else(|| phase_level(Phase::Vm))),
        }
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        if target == Phase::Loader.target() {
            self.loader
        } else if target == Phase::Vm.target() {
            self.vm
        } else {
            self.global
        }
    }

    /// VM 目标是否会输出 debug 日志（决定是否生成反汇编清单）
    pub fn vm_debug_enabled(&self) -> bool {
        self.vm >= Level::DEBUG
    }
}

pub fn to_tracing(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let cfg = LogConfig::resolve(&LoggingConfig::default(), 0, None);
        assert_eq!(cfg.global, Level::WARN);
        assert_eq!(cfg.level_for("octet::vm"), Level::WARN);
    }

    #[test]
    fn test_verbosity_raises_level() {
        let cfg = LogConfig::resolve(&LoggingConfig::default(), 2, None);
        assert_eq!(cfg.global, Level::DEBUG);
        let cfg = LogConfig::resolve(&LoggingConfig::default(), 9, None);
        assert_eq!(cfg.global, Level::TRACE);
    }

    #[test]
    fn test_vm_override() {
        let file = LoggingConfig {
            vm: Some(LogLevel::Info),
            ..LoggingConfig::default()
        };
        let cfg = LogConfig::resolve(&file, 0, Some(LogLevel::Trace));
        assert_eq!(cfg.level_for("octet::vm"), Level::TRACE);
        assert_eq!(cfg.level_for("octet::loader"), Level::WARN);
        assert_eq!(cfg.level_for("octet::cli"), Level::WARN);
    }

    #[test]
    fn test_phase_levels_from_file() {
        let file = LoggingConfig {
            level: LogLevel::Error,
            loader: Some(LogLevel::Info),
            vm: Some(LogLevel::Debug),
        };
        let cfg = LogConfig::resolve(&file, 0, None);
        assert_eq!(cfg.level_for("octet::cli"), Level::ERROR);
        assert_eq!(cfg.level_for("octet::loader"), Level::INFO);
        assert_eq!(cfg.level_for("octet::vm"), Level::DEBUG);
        assert!(cfg.vm_debug_enabled());

        // -v 提高但不降低阶段级别
        let cfg = LogConfig::resolve(&file, 1, None);
        assert_eq!(cfg.level_for("octet::cli"), Level::INFO);
        assert_eq!(cfg.level_for("octet::vm"), Level::DEBUG);
    }

    #[test]
    fn test_vm_debug_follows_log_vm() {
        let cfg = LogConfig::resolve(&LoggingConfig::default(), 0, None);
        assert!(!cfg.vm_debug_enabled());
        let cfg = LogConfig::resolve(&LoggingConfig::default(), 0, Some(LogLevel::Debug));
        assert!(cfg.vm_debug_enabled());
        let cfg = LogConfig::resolve(&LoggingConfig::default(), 2, None);
        assert!(cfg.vm_debug_enabled());
    }
}
