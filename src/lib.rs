//! # pixel_pioneers 库
//!
//! 本库包含图像编辑工具的核心逻辑：手写的 24 位 BMP 编解码器、
//! 按扩展名分派的图像读写、颜色调整与几何变换，以及批处理流程。

// 声明库包含的所有模块。

pub mod actions;
pub mod adjustments;
pub mod bmp;
pub mod cli;
pub mod constants;
pub mod handler;
pub mod image_io;
pub mod naming;
pub mod pixel;
pub mod transforms;
