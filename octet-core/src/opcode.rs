//! 操作码定义

use octet_config::{ConfigError, OpcodeTable};

/// 操作码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    End,
    Jmp,
    Swp,
    Add,
    Xor,
    Invert,
    Print,
}

impl Opcode {
    pub const ALL: [Opcode; 7] = [
        Opcode::End,
        Opcode::Jmp,
        Opcode::Swp,
        Opcode::Add,
        Opcode::Xor,
        Opcode::Invert,
        Opcode::Print,
    ];

    /// 指令总长度（含操作码字节）
    pub fn size(self) -> usize {
        match self {
            Opcode::End => 1,
            Opcode::Jmp => 3,
            Opcode::Swp => 3,
            Opcode::Add => 6,
            Opcode::Xor => 10,
            Opcode::Invert => 2,
            Opcode::Print => 2,
        }
    }

    /// 操作数字节数
    pub fn operand_size(self) -> usize {
        self.size() - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::End => "END",
            Opcode::Jmp => "JMP",
            Opcode::Swp => "SWP",
            Opcode::Add => "ADD",
            Opcode::Xor => "XOR",
            Opcode::Invert => "INVERT",
            Opcode::Print => "PRINT",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 标签字节 → 操作码 的查找表
#[derive(Debug, Clone)]
pub struct OpcodeDecoder {
    table: OpcodeTable,
    lookup: [Option<Opcode>; 256],
}

impl OpcodeDecoder {
    /// 根据标签表构建，标签重复时报错
    pub fn new(table: &OpcodeTable) -> Result<Self, ConfigError> {
        table.validate()?;
        Ok(Self {
            table: *table,
            lookup: build_lookup(table),
        })
    }

    pub fn decode(&self, tag: u8) -> Option<Opcode> {
        self.lookup[usize::from(tag)]
    }

    pub fn tag(&self, op: Opcode) -> u8 {
        tag_of(&self.table, op)
    }
}

impl Default for OpcodeDecoder {
    fn default() -> Self {
        let table = OpcodeTable::default();
        Self {
            lookup: build_lookup(&table),
            table,
        }
    }
}

fn build_lookup(table: &OpcodeTable) -> [Option<Opcode>; 256] {
    let mut lookup = [None; 256];
    for op in Opcode::ALL {
        lookup[usize::from(tag_of(table, op))] = Some(op);
    }
    lookup
}

fn tag_of(table: &OpcodeTable, op: Opcode) -> u8 {
    match op {
        Opcode::End => table.end,
        Opcode::Jmp => table.jmp,
        Opcode::Swp => table.swp,
        Opcode::Add => table.add,
        Opcode::Xor => table.xor,
        Opcode::Invert => table.invert,
        Opcode::Print => table.print,
    }
}
