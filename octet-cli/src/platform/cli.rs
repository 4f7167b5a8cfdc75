//! CLI 格式化输出
//!
//! 诊断信息一律写到 stderr，不与 PRINT 的字节流混在一起。

use octet_api::{Halt, OctetError};

/// 加载、配置或 IO 失败
pub const EXIT_FAILURE: i32 = 1;
/// 遇到未知操作码
pub const EXIT_UNKNOWN_OPCODE: i32 = 2;
/// 步数上限或停滞停机
pub const EXIT_ABORTED: i32 = 3;

/// 停机原因对应的退出码
pub fn exit_code_for(halt: &Halt) -> i32 {
    match halt {
        Halt::End { .. } | Halt::OutOfBounds { .. } => 0,
        Halt::UnknownOpcode { .. } => EXIT_UNKNOWN_OPCODE,
        Halt::StepLimit { .. } | Halt::Stalled { .. } => EXIT_ABORTED,
    }
}

/// 非正常停机时在 stderr 打印诊断
pub fn report_halt(halt: &Halt) {
    match halt {
        Halt::End { .. } | Halt::OutOfBounds { .. } => {}
        Halt::UnknownOpcode { .. } => eprintln!("{halt}"),
        Halt::StepLimit { .. } | Halt::Stalled { .. } => eprintln!("octet: {halt}"),
    }
}

/// 打印错误及其来源链
pub fn print_error(e: &OctetError) {
    eprintln!("❌ [{}] {}", e.phase(), e);
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("   caused by: {cause}");
        source = cause.source();
    }
}
