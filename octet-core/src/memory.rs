//! 执行内存
//!
//! 代码与数据共用的一块定长字节缓冲区。所有访问都带边界检查，
//! 越界时返回 `None` / `false`，不会 panic。

use std::fmt;

/// 执行内存（长度在创建时固定，之后不再改变）
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// 内存长度 `L`
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `[at, at + width)` 是否完全落在 `[0, L)` 内
    pub fn contains_range(&self, at: usize, width: usize) -> bool {
        at.checked_add(width).is_some_and(|end| end <= self.len())
    }

    /// 读取单个字节
    pub fn get(&self, at: usize) -> Option<u8> {
        self.bytes.get(at).copied()
    }

    /// 写入单个字节，越界时不做任何修改并返回 `false`
    pub fn set(&mut self, at: usize, byte: u8) -> bool {
        match self.bytes.get_mut(at) {
            Some(slot) => {
                *slot = byte;
                true
            }
            None => false,
        }
    }

    /// 读取 `N` 个连续字节
    pub fn read<const N: usize>(&self, at: usize) -> Option<[u8; N]> {
        let end = at.checked_add(N)?;
        self.bytes.get(at..end)?.try_into().ok()
    }

    /// 写入 `N` 个连续字节；任一字节越界则整体不写
    pub fn write<const N: usize>(&mut self, at: usize, value: [u8; N]) -> bool {
        match at
            .checked_add(N)
            .and_then(|end| self.bytes.get_mut(at..end))
        {
            Some(slot) => {
                slot.copy_from_slice(&value);
                true
            }
            None => false,
        }
    }

    /// 交换两个字节；任一下标越界则不做修改
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.len() || b >= self.len() {
            return false;
        }
        self.bytes.swap(a, b);
        true
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }
}

impl From<Vec<u8>> for Memory {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Memory {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Memory {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.len())
            .field("bytes", &self.bytes)
            .finish()
    }
}
