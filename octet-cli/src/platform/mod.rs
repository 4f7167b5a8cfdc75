//! 平台适配层：终端诊断输出与退出码

mod cli;

pub use cli::{exit_code_for, print_error, report_halt, EXIT_FAILURE};
