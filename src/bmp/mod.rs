//! # BMP 编解码模块
//!
//! 手写的 24 位未压缩 BMP 读写器，不依赖图像库。
//! 其余模块只通过 [`read_bmp`] 和 [`write_bmp`] 使用它。

mod cursor;
mod decode;
mod encode;
mod error;
mod header;

pub use decode::decode;
pub use encode::encode;
pub use error::BmpError;
pub use header::{BitmapHeader, build_header, parse_header, row_padding};

use crate::constants::BMP_HEADER_SIZE;
use crate::pixel::PixelGrid;
use log::{debug, info};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// 从磁盘读取一张 24 位 BMP 图像。
///
/// # Errors
///
/// * 路径不存在：[`BmpError::FileNotFound`]。
/// * 文件不足 54 字节或其他 I/O 失败：[`BmpError::Io`]。
/// * 头部或像素数据不合法：[`parse_header`] 与 [`decode`] 返回的错误。
pub fn read_bmp(path: impl AsRef<Path>) -> Result<PixelGrid, BmpError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| BmpError::from_read(path, e))?;

    let mut header_bytes = [0u8; BMP_HEADER_SIZE];
    file.read_exact(&mut header_bytes)
        .map_err(|e| BmpError::from_read(path, e))?;
    let header = parse_header(&header_bytes)?;

    let mut pixel_bytes = Vec::with_capacity(header.pixel_data_len().min(1 << 24));
    file.read_to_end(&mut pixel_bytes)
        .map_err(|e| BmpError::from_read(path, e))?;

    let grid = decode(&header, &pixel_bytes)?;
    info!(
        "Read {}x{} BMP from {}",
        header.width,
        header.height,
        path.display()
    );
    Ok(grid)
}

/// 把像素网格写成 24 位 BMP 文件，必要时创建父目录。
///
/// 整个文件先在内存中编码完成，再一次性写出，编码失败不会留下残缺文件。
///
/// # Errors
///
/// * 网格为空或行长不一致：[`BmpError::InvalidPixelData`]。
/// * 创建目录或写文件失败：[`BmpError::Io`]。
pub fn write_bmp(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<(), BmpError> {
    let path = path.as_ref();
    let bytes = encode_bmp(grid)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BmpError::from_write(parent, e))?;
    }
    fs::write(path, &bytes).map_err(|e| BmpError::from_write(path, e))?;

    info!("Wrote {} bytes of BMP to {}", bytes.len(), path.display());
    Ok(())
}

/// 从内存中的完整 BMP 文件解码。
pub fn decode_bmp(bytes: &[u8]) -> Result<PixelGrid, BmpError> {
    let header_bytes: &[u8; BMP_HEADER_SIZE] = bytes
        .get(..BMP_HEADER_SIZE)
        .and_then(|h| h.try_into().ok())
        .ok_or(BmpError::TruncatedData {
            needed: BMP_HEADER_SIZE,
            available: bytes.len(),
        })?;
    let header = parse_header(header_bytes)?;
    decode(&header, &bytes[BMP_HEADER_SIZE..])
}

/// 把像素网格编码成完整的 BMP 文件字节 (头部 + 像素)。
pub fn encode_bmp(grid: &PixelGrid) -> Result<Vec<u8>, BmpError> {
    let (header, pixels) = encode(grid)?;
    let mut bytes = Vec::with_capacity(BMP_HEADER_SIZE + pixels.len());
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&pixels);
    debug!("Encoded BMP: {} bytes", bytes.len());
    Ok(bytes)
}
