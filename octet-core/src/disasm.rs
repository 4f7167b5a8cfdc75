//! 静态反汇编
//!
//! 从偏移 0 开始线性译码，不跟随跳转，也不模拟自修改。
//! 无法识别的字节或被截断的尾部以 `.byte` 形式列出，然后从下一个字节继续。

use crate::memory::Memory;
use crate::opcode::{Opcode, OpcodeDecoder};
use std::fmt;

/// 译码后的一条指令（仅用于展示）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    End,
    Jmp { displacement: i16 },
    Swp { first: u8, second: u8 },
    Add { index: u8, value: u32 },
    Xor { index: u8, value: i64 },
    Invert { index: u8 },
    Print { byte: u8 },
}

/// 译码失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// 越过内存末尾
    OutOfBounds,
    UnknownOpcode(u8),
    /// 操作数不完整
    Truncated(Opcode),
}

impl Instruction {
    /// 译码 `at` 处的指令
    pub fn decode(
        memory: &Memory,
        at: usize,
        decoder: &OpcodeDecoder,
    ) -> Result<Instruction, DecodeError> {
        let tag = memory.get(at).ok_or(DecodeError::OutOfBounds)?;
        let opcode = decoder
            .decode(tag)
            .ok_or(DecodeError::UnknownOpcode(tag))?;
        if !memory.contains_range(at, opcode.size()) {
            return Err(DecodeError::Truncated(opcode));
        }

        let operand = |offset: usize| memory.get(at + offset).unwrap_or_default();
        let instruction = match opcode {
            Opcode::End => Instruction::End,
            Opcode::Jmp => Instruction::Jmp {
                displacement: i16::from_le_bytes([operand(1), operand(2)]),
            },
            Opcode::Swp => Instruction::Swp {
                first: operand(1),
                second: operand(2),
            },
            Opcode::Add => Instruction::Add {
                index: operand(1),
                value: u32::from_le_bytes(memory.read(at + 2).unwrap_or_default()),
            },
            Opcode::Xor => Instruction::Xor {
                index: operand(1),
                value: i64::from_le_bytes(memory.read(at + 2).unwrap_or_default()),
            },
            Opcode::Invert => Instruction::Invert { index: operand(1) },
            Opcode::Print => Instruction::Print { byte: operand(1) },
        };
        Ok(instruction)
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::End => Opcode::End,
            Instruction::Jmp { .. } => Opcode::Jmp,
            Instruction::Swp { .. } => Opcode::Swp,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Xor { .. } => Opcode::Xor,
            Instruction::Invert { .. } => Opcode::Invert,
            Instruction::Print { .. } => Opcode::Print,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::End => write!(f, "END"),
            Instruction::Jmp { displacement } => write!(f, "JMP {displacement:+}"),
            Instruction::Swp { first, second } => write!(f, "SWP [{first}], [{second}]"),
            Instruction::Add { index, value } => write!(f, "ADD [{index}], {value}"),
            Instruction::Xor { index, value } => write!(f, "XOR [{index}], {value:#018X}"),
            Instruction::Invert { index } => write!(f, "INVERT [{index}]"),
            Instruction::Print { byte } if byte.is_ascii_graphic() || *byte == b' ' => {
                write!(f, "PRINT {byte:#04X} '{}'", char::from(*byte))
            }
            Instruction::Print { byte } => write!(f, "PRINT {byte:#04X}"),
        }
    }
}

/// 反汇编清单中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub offset: usize,
    pub bytes: Vec<u8>,
    /// `None` 表示数据字节
    pub instruction: Option<Instruction>,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{b:02X}")).collect();
        write!(f, "{:04X}  {:<29}  ", self.offset, hex.join(" "))?;
        match &self.instruction {
            Some(instruction) => write!(f, "{instruction}"),
            None => write!(f, ".byte {:#04X}", self.bytes[0]),
        }
    }
}

/// 线性反汇编整块内存
pub fn disassemble(memory: &Memory, decoder: &OpcodeDecoder) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut offset = 0;

    while offset < memory.len() {
        let line = match Instruction::decode(memory, offset, decoder) {
            Ok(instruction) => {
                let size = instruction.opcode().size();
                Line {
                    offset,
                    bytes: memory.as_bytes()[offset..offset + size].to_vec(),
                    instruction: Some(instruction),
                }
            }
            Err(_) => Line {
                offset,
                bytes: vec![memory.as_bytes()[offset]],
                instruction: None,
            },
        };
        offset += line.bytes.len();
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_each_opcode() {
        let decoder = OpcodeDecoder::default();
        let mut program = vec![0x01, 0xFE, 0xFF, 0x02, 1, 2, 0x03, 9, 0x10, 0, 0, 0];
        program.extend_from_slice(&[0x04, 3]);
        program.extend_from_slice(&(-2i64).to_le_bytes());
        program.extend_from_slice(&[0x05, 7, 0x06, b'Z', 0x00]);
        let memory = Memory::new(program);

        let lines = disassemble(&memory, &decoder);
        let decoded: Vec<_> = lines.iter().map(|l| l.instruction).collect();
        assert_eq!(
            decoded,
            vec![
                Some(Instruction::Jmp { displacement: -2 }),
                Some(Instruction::Swp { first: 1, second: 2 }),
                Some(Instruction::Add { index: 9, value: 16 }),
                Some(Instruction::Xor { index: 3, value: -2 }),
                Some(Instruction::Invert { index: 7 }),
                Some(Instruction::Print { byte: b'Z' }),
                Some(Instruction::End),
            ]
        );
        assert_eq!(lines[3].offset, 12);
        assert_eq!(lines.last().map(|l| l.offset), Some(26));
    }

    #[test]
    fn test_unknown_and_truncated_bytes_listed_as_data() {
        let decoder = OpcodeDecoder::default();
        let memory = Memory::from([0xEEu8, 0x06, b'a', 0x03, 0x01]);
        let lines = disassemble(&memory, &decoder);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].instruction, None);
        assert_eq!(lines[1].instruction, Some(Instruction::Print { byte: b'a' }));
        assert_eq!(lines[2].instruction, None);
        assert_eq!(lines[2].offset, 3);
        assert_eq!(lines[3].instruction, None);
        assert_eq!(
            Instruction::decode(&memory, 3, &decoder),
            Err(DecodeError::Truncated(Opcode::Add))
        );
        assert_eq!(
            Instruction::decode(&memory, 5, &decoder),
            Err(DecodeError::OutOfBounds)
        );
    }

    #[test]
    fn test_line_display() {
        let decoder = OpcodeDecoder::default();
        let memory = Memory::from([0x06u8, b'A', 0x00, 0xEE]);
        let rendered: Vec<String> = disassemble(&memory, &decoder)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(rendered[0].starts_with("0000  06 41"));
        assert!(rendered[0].ends_with("PRINT 0x41 'A'"));
        assert!(rendered[1].ends_with("END"));
        assert!(rendered[2].ends_with(".byte 0xEE"));
    }
}
