//! # 颜色调整模块
//!
//! 亮度、对比度、饱和度三种逐像素调整。参数范围由
//! [`crate::actions::validate`] 在调用前检查，这里的函数对任何输入都有定义。

use image::RgbImage;

/// 每个通道加上 `value` 并截断到 [0, 255]。
pub fn brightness(mut image: RgbImage, value: i16) -> RgbImage {
    for channel in image.iter_mut() {
        *channel = (i32::from(*channel) + i32::from(value)).clamp(0, 255) as u8;
    }
    image
}

/// 以每个通道的平均值为中心，把偏差乘以 `factor`。
pub fn contrast(mut image: RgbImage, factor: f32) -> RgbImage {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return image;
    }

    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(channel);
        }
    }
    let means = sums.map(|sum| sum as f32 / pixel_count as f32);

    for pixel in image.pixels_mut() {
        for (channel, &mean) in pixel.0.iter_mut().zip(means.iter()) {
            let adjusted = mean + (f32::from(*channel) - mean) * factor;
            *channel = adjusted.round().clamp(0.0, 255.0) as u8;
        }
    }
    image
}

/// 在 HSV 空间把饱和度乘以 `factor`，结果截断到 [0, 1]。
pub fn saturation(mut image: RgbImage, factor: f32) -> RgbImage {
    let factor = f64::from(factor);
    for pixel in image.pixels_mut() {
        let [r, g, b] = pixel.0.map(|c| f64::from(c) / 255.0);
        let (h, s, v) = rgb_to_hsv(r, g, b);
        let (r, g, b) = hsv_to_rgb(h, (s * factor).clamp(0.0, 1.0), v);
        pixel.0 = [r, g, b].map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8);
    }
    image
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0.0, 0.0, max);
    }

    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
