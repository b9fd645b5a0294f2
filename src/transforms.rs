//! # 几何与颜色变换模块
//!
//! 裁剪、翻转、缩放交给 `image::imageops`；旋转保持原画布尺寸，
//! 用双线性采样实现，画布外的区域填黑。

use crate::cli::FlipMode;
use crate::constants::GRAYSCALE_WEIGHTS;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// 裁剪框，右边和下边不包含在内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropBox {
    fn fits(&self, width: u32, height: u32) -> bool {
        self.x1 < self.x2 && self.x2 <= width && self.y1 < self.y2 && self.y2 <= height
    }
}

/// 裁剪到 `[x1, x2) × [y1, y2)`；框不在图像内时返回 `None`。
pub fn crop(image: &RgbImage, bounds: CropBox) -> Option<RgbImage> {
    if !bounds.fits(image.width(), image.height()) {
        return None;
    }
    Some(
        imageops::crop_imm(
            image,
            bounds.x1,
            bounds.y1,
            bounds.x2 - bounds.x1,
            bounds.y2 - bounds.y1,
        )
        .to_image(),
    )
}

pub fn flip(image: &RgbImage, mode: FlipMode) -> RgbImage {
    match mode {
        FlipMode::Horizontal => imageops::flip_horizontal(image),
        FlipMode::Vertical => imageops::flip_vertical(image),
    }
}

/// 按加权亮度转为灰度，灰度值写回全部三个通道。
pub fn grayscale(mut image: RgbImage) -> RgbImage {
    for pixel in image.pixels_mut() {
        let luma: f32 = pixel
            .0
            .iter()
            .zip(GRAYSCALE_WEIGHTS.iter())
            .map(|(&c, &w)| f32::from(c) * w)
            .sum();
        let luma = luma.round().clamp(0.0, 255.0) as u8;
        *pixel = Rgb([luma; 3]);
    }
    image
}

pub fn invert(mut image: RgbImage) -> RgbImage {
    imageops::invert(&mut image);
    image
}

pub fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// 绕 `(width / 2, height / 2)` 逆时针旋转 `angle` 度。
pub fn rotate(image: &RgbImage, angle: i32) -> RgbImage {
    if angle.rem_euclid(360) == 0 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let (sin, cos) = f64::from(angle).to_radians().sin_cos();
    let cx = f64::from(width / 2);
    let cy = f64::from(height / 2);

    // 对每个目标像素做逆旋转，找到它在源图中的位置
    RgbImage::from_fn(width, height, |x, y| {
        let dx = f64::from(x) - cx;
        let dy = f64::from(y) - cy;
        let src_x = cos * dx - sin * dy + cx;
        let src_y = sin * dx + cos * dy + cy;
        sample_bilinear(image, src_x, src_y)
    })
}

fn sample_bilinear(image: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let neighbours = [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ];

    let mut acc = [0.0f64; 3];
    for (ox, oy, weight) in neighbours {
        let px = x0 as i64 + ox;
        let py = y0 as i64 + oy;
        if weight == 0.0
            || px < 0
            || py < 0
            || px >= i64::from(image.width())
            || py >= i64::from(image.height())
        {
            continue;
        }
        let pixel = image.get_pixel(px as u32, py as u32);
        for (sum, &channel) in acc.iter_mut().zip(pixel.0.iter()) {
            *sum += weight * f64::from(channel);
        }
    }

    Rgb(acc.map(|v| v.round().clamp(0.0, 255.0) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 红色通道编码像素自身的坐标：x * 10 + y
    fn coordinate_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x * 10 + y) as u8, 0, 0]))
    }

    #[test]
    fn crop_keeps_the_box() {
        let image = coordinate_image(5, 4);
        let cropped = crop(
            &image,
            CropBox {
                x1: 1,
                y1: 2,
                x2: 4,
                y2: 4,
            },
        )
        .unwrap();
        assert_eq!(cropped.dimensions(), (3, 2));
        assert_eq!(cropped.get_pixel(0, 0).0[0], 12);
        assert_eq!(cropped.get_pixel(2, 1).0[0], 33);
    }

    #[test]
    fn crop_rejects_bad_boxes() {
        let image = coordinate_image(5, 4);
        let boxes = [
            CropBox { x1: 0, y1: 0, x2: 6, y2: 4 },
            CropBox { x1: 0, y1: 0, x2: 5, y2: 5 },
            CropBox { x1: 3, y1: 0, x2: 3, y2: 4 },
            CropBox { x1: 4, y1: 0, x2: 2, y2: 4 },
        ];
        for bounds in boxes {
            assert!(crop(&image, bounds).is_none(), "{:?}", bounds);
        }
    }

    #[test]
    fn flips_along_each_axis() {
        let image = coordinate_image(3, 2);
        let horizontal = flip(&image, FlipMode::Horizontal);
        assert_eq!(horizontal.get_pixel(0, 0).0[0], 20);
        let vertical = flip(&image, FlipMode::Vertical);
        assert_eq!(vertical.get_pixel(0, 0).0[0], 1);
    }

    #[test]
    fn grayscale_replicates_luma() {
        let image = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        assert!(grayscale(image).pixels().all(|p| p.0 == [255, 255, 255]));

        let image = RgbImage::from_pixel(1, 1, Rgb([100, 0, 0]));
        assert_eq!(grayscale(image).get_pixel(0, 0).0, [30, 30, 30]);
    }

    #[test]
    fn invert_flips_every_channel() {
        let image = RgbImage::from_pixel(2, 2, Rgb([0, 100, 255]));
        assert!(invert(image).pixels().all(|p| p.0 == [255, 155, 0]));
    }

    #[test]
    fn resize_changes_dimensions() {
        let image = RgbImage::from_pixel(8, 6, Rgb([40, 80, 120]));
        let resized = resize(&image, 4, 3);
        assert_eq!(resized.dimensions(), (4, 3));
        for pixel in resized.pixels() {
            for (&got, want) in pixel.0.iter().zip([40u8, 80, 120]) {
                assert!(got.abs_diff(want) <= 1, "{:?}", pixel);
            }
        }
    }

    #[test]
    fn rotate_full_turn_is_identity() {
        let image = coordinate_image(4, 3);
        assert_eq!(rotate(&image, 0), image);
        assert_eq!(rotate(&image, 360), image);
        assert_eq!(rotate(&image, -720), image);
    }

    #[test]
    fn rotate_half_turn_about_center() {
        let image = coordinate_image(3, 3);
        let rotated = rotate(&image, 180);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(rotated.get_pixel(x, y), image.get_pixel(2 - x, 2 - y));
            }
        }
    }

    #[test]
    fn rotate_quarter_turn_counter_clockwise() {
        let image = coordinate_image(3, 3);
        let rotated = rotate(&image, 90);
        // 逆时针 90°：源图右上角转到左上角
        assert_eq!(rotated.get_pixel(0, 0), image.get_pixel(2, 0));
        assert_eq!(rotated.get_pixel(0, 2), image.get_pixel(0, 0));
        assert_eq!(rotated.get_pixel(1, 1), image.get_pixel(1, 1));
    }

    #[test]
    fn rotate_fills_uncovered_area_with_black() {
        let image = RgbImage::from_pixel(4, 2, Rgb([200, 200, 200]));
        let rotated = rotate(&image, 90);
        assert_eq!(rotated.dimensions(), (4, 2));
        assert_eq!(rotated.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
