//! 测试辅助工具
//!
//! 提供程序拼装与执行的辅助函数

#![allow(dead_code)]

use octet_core::{Halt, Interpreter, Memory, Step};

pub const END: u8 = 0x00;
pub const JMP: u8 = 0x01;
pub const SWP: u8 = 0x02;
pub const ADD: u8 = 0x03;
pub const XOR: u8 = 0x04;
pub const INVERT: u8 = 0x05;
pub const PRINT: u8 = 0x06;

/// 执行结果
pub struct ExecResult {
    pub halt: Halt,
    pub output: Vec<u8>,
    pub memory: Memory,
    pub ip: usize,
}

/// 执行程序直到停机
pub fn run_program(program: &[u8]) -> ExecResult {
    let mut vm = Interpreter::new(program, Vec::new());
    let halt = vm.run().expect("run failed");
    let (memory, ip, output) = vm.into_parts();
    ExecResult {
        halt,
        output,
        memory,
        ip,
    }
}

/// 只执行一步，返回解释器以便检查状态
pub fn step_once(program: &[u8]) -> (Step, Interpreter<Vec<u8>>) {
    let mut vm = Interpreter::new(program, Vec::new());
    let step = vm.step().expect("step failed");
    (step, vm)
}

pub fn jmp(displacement: i16) -> Vec<u8> {
    let [lo, hi] = displacement.to_le_bytes();
    vec![JMP, lo, hi]
}

pub fn add(index: u8, value: u32) -> Vec<u8> {
    let mut bytes = vec![ADD, index];
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

pub fn xor(index: u8, value: i64) -> Vec<u8> {
    let mut bytes = vec![XOR, index];
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

pub fn print(byte: u8) -> Vec<u8> {
    vec![PRINT, byte]
}

/// 拼接多段字节
pub fn assemble(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
