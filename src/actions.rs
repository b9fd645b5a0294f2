//! # 编辑操作分派模块
//!
//! 把命令行中选择的 [`Action`] 映射到具体的调整或变换函数。
//! 操作集合在编译期固定，用 `match` 分派即可。

use crate::adjustments;
use crate::cli::Action;
use crate::constants::BRIGHTNESS_RANGE;
use crate::transforms::{self, CropBox};
use image::RgbImage;
use log::debug;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("invalid parameter for {action}: {reason}")]
    InvalidParameter {
        action: &'static str,
        reason: String,
    },

    #[error("crop box {bounds:?} is out of bounds for a {width}x{height} image")]
    OutOfBounds {
        bounds: CropBox,
        width: u32,
        height: u32,
    },
}

/// 检查与具体图像无关的参数。批处理开始前调用一次。
///
/// # Errors
///
/// 亮度超出 [-255, 255]、系数不是有限数、饱和度系数为负、
/// 裁剪框为空或缩放尺寸为 0 时返回 [`ActionError::InvalidParameter`]。
pub fn validate(action: &Action) -> Result<(), ActionError> {
    let invalid = |reason: String| {
        Err(ActionError::InvalidParameter {
            action: action.name(),
            reason,
        })
    };

    match *action {
        Action::Brightness { value } if !BRIGHTNESS_RANGE.contains(&value) => {
            invalid(format!("{} is outside {:?}", value, BRIGHTNESS_RANGE))
        }
        Action::Contrast { factor } if !factor.is_finite() => {
            invalid(format!("factor {} is not a finite number", factor))
        }
        Action::Saturation { factor } if !factor.is_finite() || factor < 0.0 => {
            invalid(format!("factor {} must be a non-negative number", factor))
        }
        Action::Crop { x1, y1, x2, y2 } if x1 >= x2 || y1 >= y2 => invalid(format!(
            "box ({}, {}, {}, {}) is empty",
            x1, y1, x2, y2
        )),
        Action::Resize { width, height } if width == 0 || height == 0 => {
            invalid(format!("target size {}x{} must be positive", width, height))
        }
        _ => Ok(()),
    }
}

/// 对图像执行一个操作。
///
/// # Errors
///
/// 参数非法时返回 [`validate`] 的错误；裁剪框超出图像时返回
/// [`ActionError::OutOfBounds`]。
pub fn apply(action: &Action, image: RgbImage) -> Result<RgbImage, ActionError> {
    validate(action)?;
    debug!(
        "Applying {:?} to a {}x{} image",
        action,
        image.width(),
        image.height()
    );

    let result = match *action {
        Action::Brightness { value } => adjustments::brightness(image, value),
        Action::Contrast { factor } => adjustments::contrast(image, factor),
        Action::Saturation { factor } => adjustments::saturation(image, factor),
        Action::Crop { x1, y1, x2, y2 } => {
            let bounds = CropBox { x1, y1, x2, y2 };
            transforms::crop(&image, bounds).ok_or(ActionError::OutOfBounds {
                bounds,
                width: image.width(),
                height: image.height(),
            })?
        }
        Action::Flip { mode } => transforms::flip(&image, mode),
        Action::Grayscale => transforms::grayscale(image),
        Action::Invert => transforms::invert(image),
        Action::Resize { width, height } => transforms::resize(&image, width, height),
        Action::Rotate { angle } => transforms::rotate(&image, angle),
    };
    Ok(result)
}
