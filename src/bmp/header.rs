//! BMP 文件头与 BITMAPINFOHEADER 的解析和生成。
//!
//! 固定布局 (小端)：
//!
//! | 偏移 | 大小 | 字段 |
//! |---|---|---|
//! | 0  | 2 | 签名 `"BM"` |
//! | 2  | 4 | 文件大小 |
//! | 10 | 4 | 像素数据偏移 (54) |
//! | 14 | 4 | DIB 头大小 (40) |
//! | 18 | 4 | 宽度 |
//! | 22 | 4 | 高度 |
//! | 26 | 2 | 颜色平面数 (1) |
//! | 28 | 2 | 位深 (24) |
//! | 30 | 4 | 压缩方式 (0) |
//! | 34 | 4 | 像素数据大小 |
//!
//! 38..54 的分辨率与调色板字段在读取时忽略，写出时置零。

use super::BmpError;
use super::cursor::ByteCursor;
use crate::constants::{
    BITS_PER_PIXEL, BMP_HEADER_SIZE, BMP_SIGNATURE, BYTES_PER_PIXEL, DIB_HEADER_SIZE,
    ROW_ALIGNMENT,
};
use log::{debug, warn};

/// 解析后的 BMP 头部。只在单次读写调用中存在。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub pixel_offset: u32,
    pub dib_header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
}

impl BitmapHeader {
    pub fn row_padding(&self) -> usize {
        row_padding(self.width as usize)
    }

    /// 一条扫描线在磁盘上的字节数 (含填充)。
    pub fn row_stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL + self.row_padding()
    }

    /// 头部声明的尺寸所需的像素数据字节数。
    pub fn pixel_data_len(&self) -> usize {
        self.row_stride() * self.height as usize
    }
}

/// 每条扫描线末尾需要补的零字节数：`(4 - (width * 3) % 4) % 4`。
pub fn row_padding(width: usize) -> usize {
    // (width * 3) % 4 == ((width % 4) * 3) % 4，避免大宽度时乘法溢出
    let used = (width % ROW_ALIGNMENT) * BYTES_PER_PIXEL % ROW_ALIGNMENT;
    (ROW_ALIGNMENT - used) % ROW_ALIGNMENT
}

/// 计算像素数据总字节数。整个文件 (头部 + 像素) 必须能用 u32 表示，否则返回 `None`。
pub fn image_size(width: usize, height: usize) -> Option<u32> {
    let size = width
        .checked_mul(BYTES_PER_PIXEL)?
        .checked_add(row_padding(width))?
        .checked_mul(height)?;
    let size = u32::try_from(size).ok()?;
    size.checked_add(BMP_HEADER_SIZE as u32)?;
    Some(size)
}

/// 从 54 字节的头部解析并校验 [`BitmapHeader`]。
///
/// 校验顺序：签名、头部大小、尺寸、平面数、位深、压缩方式、尺寸算术溢出。
///
/// # Errors
///
/// * 签名不是 `"BM"`、尺寸非正、平面数不为 1、或尺寸导致大小溢出时返回
///   [`BmpError::CorruptedHeader`]。
/// * 像素偏移不是 54、DIB 头不是 40 字节、自上而下存储、位深不是 24
///   或带压缩时返回 [`BmpError::UnsupportedVariant`]。
pub fn parse_header(bytes: &[u8; BMP_HEADER_SIZE]) -> Result<BitmapHeader, BmpError> {
    let mut cursor = ByteCursor::new(bytes);

    let signature = cursor.read_array::<2>()?;
    if signature != BMP_SIGNATURE {
        return Err(BmpError::CorruptedHeader(format!(
            "expected signature \"BM\", found {:02X?}",
            signature
        )));
    }

    let file_size = cursor.read_u32_le()?;
    cursor.skip(4)?;
    let pixel_offset = cursor.read_u32_le()?;
    let dib_header_size = cursor.read_u32_le()?;

    if pixel_offset as usize != BMP_HEADER_SIZE {
        return Err(BmpError::UnsupportedVariant(format!(
            "pixel data offset {} (only {} is supported)",
            pixel_offset, BMP_HEADER_SIZE
        )));
    }
    if dib_header_size != DIB_HEADER_SIZE {
        return Err(BmpError::UnsupportedVariant(format!(
            "DIB header of {} bytes (only BITMAPINFOHEADER is supported)",
            dib_header_size
        )));
    }

    let width = cursor.read_i32_le()?;
    let height = cursor.read_i32_le()?;
    let planes = cursor.read_u16_le()?;
    let bits_per_pixel = cursor.read_u16_le()?;
    let compression = cursor.read_u32_le()?;
    let image_size_field = cursor.read_u32_le()?;

    if height < 0 {
        return Err(BmpError::UnsupportedVariant(
            "top-down bitmaps (negative height) are not supported".to_string(),
        ));
    }
    if width <= 0 || height == 0 {
        return Err(BmpError::CorruptedHeader(format!(
            "invalid dimensions {}x{}",
            width, height
        )));
    }
    if planes != 1 {
        return Err(BmpError::CorruptedHeader(format!(
            "expected 1 color plane, found {}",
            planes
        )));
    }
    if bits_per_pixel != BITS_PER_PIXEL {
        return Err(BmpError::UnsupportedVariant(format!(
            "{} bits per pixel (only 24 is supported)",
            bits_per_pixel
        )));
    }
    if compression != 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "compression method {} (only uncompressed is supported)",
            compression
        )));
    }

    let (width, height) = (width.unsigned_abs(), height.unsigned_abs());
    let expected_size = image_size(width as usize, height as usize).ok_or_else(|| {
        BmpError::CorruptedHeader(format!("dimensions {}x{} overflow", width, height))
    })?;

    // 很多编码器把这两个字段写成 0 或写错，只记录不拒绝
    if image_size_field != 0 && image_size_field != expected_size {
        warn!(
            "BMP header declares {} bytes of pixel data, dimensions imply {}",
            image_size_field, expected_size
        );
    }
    if file_size != expected_size + BMP_HEADER_SIZE as u32 {
        debug!(
            "BMP header file size {} differs from computed {}",
            file_size,
            expected_size + BMP_HEADER_SIZE as u32
        );
    }

    let header = BitmapHeader {
        signature,
        file_size,
        pixel_offset,
        dib_header_size,
        width,
        height,
        planes,
        bits_per_pixel,
        compression,
        image_size: image_size_field,
    };
    debug!("Parsed BMP header: {:?}", header);
    Ok(header)
}

/// 为 `width` × `height` 的 24 位图像生成 54 字节头部。
///
/// # Errors
///
/// 尺寸为 0、超过 `i32::MAX`，或文件大小无法用 u32 表示时返回
/// [`BmpError::InvalidPixelData`]。
pub fn build_header(width: u32, height: u32) -> Result<[u8; BMP_HEADER_SIZE], BmpError> {
    let valid = (1..=i32::MAX as u32).contains(&width) && (1..=i32::MAX as u32).contains(&height);
    let image_size = image_size(width as usize, height as usize)
        .filter(|_| valid)
        .ok_or_else(|| {
            BmpError::InvalidPixelData(format!(
                "{}x{} cannot be stored as a BMP image",
                width, height
            ))
        })?;
    let file_size = image_size + BMP_HEADER_SIZE as u32;

    let mut header = [0u8; BMP_HEADER_SIZE];
    let mut put = |offset: usize, bytes: &[u8]| {
        header[offset..offset + bytes.len()].copy_from_slice(bytes);
    };
    put(0, &BMP_SIGNATURE);
    put(2, &file_size.to_le_bytes());
    put(10, &(BMP_HEADER_SIZE as u32).to_le_bytes());
    put(14, &DIB_HEADER_SIZE.to_le_bytes());
    put(18, &width.to_le_bytes());
    put(22, &height.to_le_bytes());
    put(26, &1u16.to_le_bytes());
    put(28, &BITS_PER_PIXEL.to_le_bytes());
    put(30, &0u32.to_le_bytes());
    put(34, &image_size.to_le_bytes());

    Ok(header)
}
