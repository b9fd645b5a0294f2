//! 带长度检查的字节游标。
//!
//! 所有读取都先确认 `position + count` 不超过缓冲区长度，
//! 越界时立即返回 [`BmpError::TruncatedData`]，不会 panic，也不会补零。

use super::BmpError;

pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// 借出接下来的 `count` 个字节并前移游标。
    pub(crate) fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], BmpError> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(BmpError::TruncatedData {
                needed: self.position.saturating_add(count),
                available: self.data.len(),
            })?;

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<(), BmpError> {
        self.read_bytes(count).map(|_| ())
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_array().map(i32::from_le_bytes)
    }
}
