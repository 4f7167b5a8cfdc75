//! API 类型定义
//!
//! 执行的输出类型。

use octet_core::Halt;

/// 执行输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// 停机原因
    pub halt: Halt,
    /// 停机时的指令指针
    pub ip: usize,
    /// 已执行的处理器调用次数
    pub steps: u64,
    /// 停机时的执行内存
    pub memory: Vec<u8>,
}

impl ExecuteOutput {
    pub fn is_success(&self) -> bool {
        self.halt.is_success()
    }
}
