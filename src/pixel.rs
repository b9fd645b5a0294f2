//! # 像素网格模块
//!
//! `PixelGrid` 是各个模块之间传递图像的统一形式：按行存储的 RGB 三元组，
//! 第 0 行是显示时的最上一行。BMP 编解码器直接读写它，
//! 调整与变换则先把它转换成 `image::RgbImage` 再交给图像库处理。

use crate::bmp::BmpError;
use image::{Rgb, RgbImage};

/// 一个 (R, G, B) 像素。
pub type Rgb8 = [u8; 3];

/// 按行组织的 RGB 像素网格。
///
/// 构造时不检查形状，写出或转换之前由 [`PixelGrid::dimensions`] 校验
/// 网格非空且每行长度一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelGrid {
    rows: Vec<Vec<Rgb8>>,
}

impl PixelGrid {
    pub fn from_rows(rows: Vec<Vec<Rgb8>>) -> Self {
        Self { rows }
    }

    /// 创建一个所有像素都为 `color` 的 `width` × `height` 网格。
    pub fn filled(width: usize, height: usize, color: Rgb8) -> Self {
        Self {
            rows: vec![vec![color; width]; height],
        }
    }

    pub fn rows(&self) -> &[Vec<Rgb8>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Rgb8>> {
        self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// 第一行的像素数；空网格返回 0。
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb8> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// 校验网格并返回 `(width, height)`。
    ///
    /// # Errors
    ///
    /// 网格没有任何行、第一行为空，或者某一行的长度与第一行不同时，
    /// 返回 [`BmpError::InvalidPixelData`]。
    pub fn dimensions(&self) -> Result<(usize, usize), BmpError> {
        let width = self.width();
        if width == 0 {
            return Err(BmpError::InvalidPixelData(
                "pixel grid is empty".to_string(),
            ));
        }

        if let Some((index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(BmpError::InvalidPixelData(format!(
                "pixel grid is ragged: row {} has {} pixels, expected {}",
                index,
                row.len(),
                width
            )));
        }

        Ok((width, self.rows.len()))
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(image: &RgbImage) -> Self {
        let rows = image
            .rows()
            .map(|row| row.map(|pixel| pixel.0).collect())
            .collect();
        Self { rows }
    }
}

impl TryFrom<&PixelGrid> for RgbImage {
    type Error = BmpError;

    fn try_from(grid: &PixelGrid) -> Result<Self, Self::Error> {
        let (width, height) = grid.dimensions()?;
        let too_large = || {
            BmpError::InvalidPixelData(format!(
                "pixel grid of {}x{} is too large for an image buffer",
                width, height
            ))
        };
        let width = u32::try_from(width).map_err(|_| too_large())?;
        let height = u32::try_from(height).map_err(|_| too_large())?;

        Ok(RgbImage::from_fn(width, height, |x, y| {
            Rgb(grid.rows[y as usize][x as usize])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_of_rectangular_grid() {
        let grid = PixelGrid::filled(5, 3, [1, 2, 3]);
        assert_eq!(grid.dimensions().unwrap(), (5, 3));
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(matches!(
            PixelGrid::default().dimensions(),
            Err(BmpError::InvalidPixelData(_))
        ));
        assert!(matches!(
            PixelGrid::from_rows(vec![vec![]]).dimensions(),
            Err(BmpError::InvalidPixelData(_))
        ));
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let grid = PixelGrid::from_rows(vec![vec![[0; 3]; 4], vec![[0; 3]; 3]]);
        let err = grid.dimensions().unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn converts_to_and_from_rgb_image() {
        let grid = PixelGrid::from_rows(vec![
            vec![[255, 0, 0], [0, 255, 0]],
            vec![[0, 0, 255], [255, 255, 255]],
        ]);
        let image = RgbImage::try_from(&grid).unwrap();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 255]);
        assert_eq!(PixelGrid::from(&image), grid);
    }
}
