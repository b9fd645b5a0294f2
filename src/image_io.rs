//! # 图像读写分派模块
//!
//! 根据文件扩展名选择读写实现：BMP 使用本库手写的编解码器，
//! PNG 和 JPEG 交给 `image` 库。支持的格式在编译期固定。

use crate::bmp::{self, BmpError};
use crate::pixel::PixelGrid;
use image::RgbImage;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("expected a path to a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Bmp(#[from] BmpError),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// 某种文件格式的读写能力。
pub trait ImageCodec {
    fn read(&self, path: &Path) -> Result<PixelGrid, ImageIoError>;

    fn write(&self, path: &Path, grid: &PixelGrid) -> Result<(), ImageIoError>;
}

/// 手写的 24 位 BMP 编解码器。
pub struct BmpCodec;

impl ImageCodec for BmpCodec {
    fn read(&self, path: &Path) -> Result<PixelGrid, ImageIoError> {
        Ok(bmp::read_bmp(path)?)
    }

    fn write(&self, path: &Path, grid: &PixelGrid) -> Result<(), ImageIoError> {
        Ok(bmp::write_bmp(path, grid)?)
    }
}

/// 由 `image` 库处理的 PNG / JPEG。读取时统一转换为 8 位 RGB。
pub struct RasterCodec;

impl ImageCodec for RasterCodec {
    fn read(&self, path: &Path) -> Result<PixelGrid, ImageIoError> {
        let image = image::open(path)
            .map_err(|e| match e {
                image::ImageError::IoError(source) if source.kind() == ErrorKind::NotFound => {
                    ImageIoError::FileNotFound(path.to_path_buf())
                }
                other => ImageIoError::Image(other),
            })?
            .to_rgb8();
        debug!(
            "Decoded {}x{} image from {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(PixelGrid::from(&image))
    }

    fn write(&self, path: &Path, grid: &PixelGrid) -> Result<(), ImageIoError> {
        let image = RgbImage::try_from(grid)?;
        image.save(path)?;
        Ok(())
    }
}

/// 按扩展名 (不区分大小写) 选择编解码器。
pub fn codec_for_path(path: &Path) -> Result<&'static dyn ImageCodec, ImageIoError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "bmp" => Ok(&BmpCodec),
        "png" | "jpg" | "jpeg" => Ok(&RasterCodec),
        _ => Err(ImageIoError::UnsupportedFormat(extension)),
    }
}

/// 读取一张图像。
///
/// # Errors
///
/// 扩展名不受支持、路径是目录，或底层编解码器失败时返回错误。
/// 路径不存在由编解码器报告为 `FileNotFound`。
pub fn read_image(path: &Path) -> Result<PixelGrid, ImageIoError> {
    let codec = codec_for_path(path)?;
    if path.is_dir() {
        return Err(ImageIoError::NotAFile(path.to_path_buf()));
    }
    codec.read(path)
}

/// 写出一张图像，格式由扩展名决定，缺失的父目录会被创建。
pub fn write_image(path: &Path, grid: &PixelGrid) -> Result<(), ImageIoError> {
    let codec = codec_for_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ImageIoError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    codec.write(path, grid)
}
