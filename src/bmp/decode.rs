//! 24 位 BMP 像素数据解码。

use super::BmpError;
use super::cursor::ByteCursor;
use super::header::BitmapHeader;
use crate::constants::BYTES_PER_PIXEL;
use crate::pixel::{PixelGrid, Rgb8};
use log::debug;

/// 按头部描述把磁盘上的像素字节还原为 [`PixelGrid`]。
///
/// 磁盘上第一条扫描线是图像最下面一行，每个像素按 B、G、R 存储，
/// 每行末尾跟着 `header.row_padding()` 个填充字节。返回的网格第 0 行是最上一行。
///
/// # Errors
///
/// 缓冲区不足以容纳头部声明的 `height` 条扫描线 (含填充) 时返回
/// [`BmpError::TruncatedData`]。多余的尾部字节会被忽略。
pub fn decode(header: &BitmapHeader, pixel_bytes: &[u8]) -> Result<PixelGrid, BmpError> {
    let width = header.width as usize;
    let height = header.height as usize;
    let padding = header.row_padding();
    let row_len = width * BYTES_PER_PIXEL;

    let mut cursor = ByteCursor::new(pixel_bytes);
    // 容量以实际数据能填满的行数为上限，头部声明的高度不可信
    let mut rows: Vec<Vec<Rgb8>> =
        Vec::with_capacity(height.min(pixel_bytes.len() / row_len.max(1) + 1));

    for _ in 0..height {
        let scanline = cursor.read_bytes(row_len)?;
        rows.push(
            scanline
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|bgr| [bgr[2], bgr[1], bgr[0]])
                .collect(),
        );
        cursor.skip(padding)?;
    }

    // 自下而上 -> 自上而下
    rows.reverse();

    if cursor.remaining() > 0 {
        debug!(
            "Ignoring {} trailing bytes after {} bytes of pixel data",
            cursor.remaining(),
            cursor.position()
        );
    }

    Ok(PixelGrid::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::header::{build_header, parse_header};

    fn header(width: u32, height: u32) -> BitmapHeader {
        parse_header(&build_header(width, height).unwrap()).unwrap()
    }

    #[test]
    fn decodes_bottom_up_bgr_rows() {
        let bytes = [
            255, 0, 0, 255, 255, 255, 0, 0, // 磁盘第一行 = 图像第 1 行
            0, 0, 255, 0, 255, 0, 0, 0, // 图像第 0 行
        ];
        let grid = decode(&header(2, 2), &bytes).unwrap();
        assert_eq!(
            grid.rows(),
            &[
                vec![[255, 0, 0], [0, 255, 0]],
                vec![[0, 0, 255], [255, 255, 255]],
            ]
        );
    }

    #[test]
    fn skips_exactly_the_row_padding() {
        // 宽度 1：每行 3 字节像素 + 1 字节填充，填充里放非零值确认被跳过
        let bytes = [1, 2, 3, 0xAA, 4, 5, 6, 0xBB, 7, 8, 9, 0xCC];
        let grid = decode(&header(1, 3), &bytes).unwrap();
        assert_eq!(grid.rows(), &[vec![[9, 8, 7]], vec![[6, 5, 4]], vec![[3, 2, 1]]]);
    }

    #[test]
    fn truncated_payload_is_an_error() {
        let err = decode(&header(100, 100), &[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            BmpError::TruncatedData {
                needed: 300,
                available: 10
            }
        ));
    }

    #[test]
    fn missing_final_padding_is_an_error() {
        // 2x1 需要 6 字节像素 + 2 字节填充
        let err = decode(&header(2, 1), &[0u8; 6]).unwrap_err();
        assert!(matches!(err, BmpError::TruncatedData { needed: 8, .. }));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let bytes = [10, 20, 30, 0, 99, 99, 99, 99];
        let grid = decode(&header(1, 1), &bytes).unwrap();
        assert_eq!(grid.get(0, 0), Some([30, 20, 10]));
    }
}
