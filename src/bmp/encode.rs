//! 24 位 BMP 像素数据编码。

use super::BmpError;
use super::header::{build_header, image_size, row_padding};
use crate::constants::BMP_HEADER_SIZE;
use crate::pixel::PixelGrid;
use std::iter;

/// 把 [`PixelGrid`] 编码成 BMP 头部和像素字节。
///
/// 最后一行先写；每个像素写成 B、G、R，每行末尾补零到 4 字节边界。
///
/// # Errors
///
/// 网格为空、行长不一致，或尺寸超出 BMP 能表示的范围时返回
/// [`BmpError::InvalidPixelData`]。
pub fn encode(grid: &PixelGrid) -> Result<([u8; BMP_HEADER_SIZE], Vec<u8>), BmpError> {
    let (width, height) = grid.dimensions()?;
    let too_large = || {
        BmpError::InvalidPixelData(format!(
            "{}x{} cannot be stored as a BMP image",
            width, height
        ))
    };

    let header = build_header(
        u32::try_from(width).map_err(|_| too_large())?,
        u32::try_from(height).map_err(|_| too_large())?,
    )?;
    let expected_len = image_size(width, height).ok_or_else(too_large)? as usize;
    let padding = row_padding(width);

    let mut pixels = Vec::with_capacity(expected_len);
    for row in grid.rows().iter().rev() {
        for &[r, g, b] in row {
            pixels.extend_from_slice(&[b, g, r]);
        }
        pixels.extend(iter::repeat_n(0u8, padding));
    }
    debug_assert_eq!(pixels.len(), expected_len);

    Ok((header, pixels))
}
