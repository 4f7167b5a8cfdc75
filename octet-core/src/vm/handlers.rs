//! 七个操作码处理器
//!
//! 每个处理器直接从执行内存读取操作数（操作数可能已被先前的指令改写），
//! 校验全部下标后才修改内存。校验失败时不产生任何效果，也不推进 `ip`。
//! 操作数本身越过内存末尾（指令被截断）同样按校验失败处理。

use crate::memory::Memory;
use std::io::{self, Write};

/// 处理器给出的下一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// 新的 `ip`
    Next(usize),
    /// 校验失败，`ip` 保持不变
    Stall,
}

/// JMP: `ip := ip + d`，位移相对当前 `ip`，不是下一条指令。
///
/// 不做边界检查；负数结果按无符号回绕，下一次取指时由 `ip >= L` 停机。
pub(crate) fn jmp(memory: &Memory, ip: usize) -> Flow {
    let Some(raw) = memory.read::<2>(ip + 1) else {
        return Flow::Stall;
    };
    let displacement = i16::from_le_bytes(raw);
    Flow::Next(ip.wrapping_add_signed(isize::from(displacement)))
}

/// SWP: 交换 `i1`、`i2` 两处的字节
pub(crate) fn swp(memory: &mut Memory, ip: usize) -> Flow {
    let Some([first, second]) = memory.read::<2>(ip + 1) else {
        return Flow::Stall;
    };
    if !memory.swap(usize::from(first), usize::from(second)) {
        return Flow::Stall;
    }
    Flow::Next(ip + 3)
}

/// ADD: 把 u32 (LE) 回绕加到 `idx` 处的 4 字节整数上
pub(crate) fn add(memory: &mut Memory, ip: usize) -> Flow {
    let (Some([index]), Some(raw)) = (memory.read::<1>(ip + 1), memory.read::<4>(ip + 2)) else {
        return Flow::Stall;
    };
    let index = usize::from(index);
    let Some(target) = memory.read::<4>(index) else {
        return Flow::Stall;
    };

    let value = u32::from_le_bytes(raw);
    let sum = u32::from_le_bytes(target).wrapping_add(value);
    if !memory.write(index, sum.to_le_bytes()) {
        return Flow::Stall;
    }
    Flow::Next(ip + 6)
}

/// XOR: 把 i64 (LE) 异或到 `idx` 处的 8 字节整数上
pub(crate) fn xor(memory: &mut Memory, ip: usize) -> Flow {
    let (Some([index]), Some(raw)) = (memory.read::<1>(ip + 1), memory.read::<8>(ip + 2)) else {
        return Flow::Stall;
    };
    let index = usize::from(index);
    let Some(target) = memory.read::<8>(index) else {
        return Flow::Stall;
    };

    let value = i64::from_le_bytes(raw);
    let result = i64::from_le_bytes(target) ^ value;
    if !memory.write(index, result.to_le_bytes()) {
        return Flow::Stall;
    }
    Flow::Next(ip + 10)
}

/// INVERT: 反转 `idx` 处字节的位序（bit 0 ↔ bit 7 ...）
pub(crate) fn invert(memory: &mut Memory, ip: usize) -> Flow {
    let Some([index]) = memory.read::<1>(ip + 1) else {
        return Flow::Stall;
    };
    let index = usize::from(index);
    let Some(byte) = memory.get(index) else {
        return Flow::Stall;
    };
    if !memory.set(index, byte.reverse_bits()) {
        return Flow::Stall;
    }
    Flow::Next(ip + 2)
}

/// PRINT: 输出操作数字节本身（不是下标），并立即刷新
pub(crate) fn print<W: Write>(memory: &Memory, ip: usize, output: &mut W) -> io::Result<Flow> {
    let Some(byte) = memory.read::<1>(ip + 1) else {
        return Ok(Flow::Stall);
    };
    output.write_all(&byte)?;
    output.flush()?;
    Ok(Flow::Next(ip + 2))
}
