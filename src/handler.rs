//! # 命令处理逻辑模块
//!
//! 包含批量处理图像的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用编辑操作以及向用户报告结果。
//! 单个文件失败不会中断整个批次。

use crate::actions;
use crate::cli::{Action, Cli};
use crate::image_io::{read_image, write_image};
use crate::naming::output_path;
use crate::pixel::PixelGrid;
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use log::{error, info};
use std::path::{Path, PathBuf};

/// 一次批处理的结果。
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 成功写出的输出文件。
    pub written: Vec<PathBuf>,
    /// 处理失败的输入文件及其错误。
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// 处理整次运行：对 `cli.images` 中的每张图像执行 `cli.action`。
///
/// 输出文件写到 `cli.dest`，文件名由 [`output_path`] 生成。
///
/// # Arguments
///
/// * `cli` - 解析后的命令行配置。
///
/// # Errors
///
/// 只有操作参数本身非法时才返回错误；单个文件的失败记录在
/// [`BatchReport::failed`] 中，其余文件继续处理。
pub fn run(cli: Cli) -> Result<BatchReport> {
    let Cli {
        images,
        dest,
        force,
        action,
        ..
    } = cli;

    actions::validate(&action).with_context(|| {
        format!(
            "Invalid arguments for action: {}",
            action.name().red().bold()
        )
    })?;

    let mut report = BatchReport::default();
    for input in images {
        let output = output_path(&input, &dest, action.name());
        match process_image(&input, &output, &action, force) {
            Ok(()) => {
                println!(
                    "The image has been successfully processed and saved: {}",
                    output.to_string_lossy().green().bold()
                );
                report.written.push(output);
            }
            Err(e) => {
                error!("{:#}", e);
                report.failed.push((input, e));
            }
        }
    }

    info!(
        "Processed {} image(s): {} written, {} failed",
        report.total(),
        report.written.len(),
        report.failed.len()
    );
    Ok(report)
}

/// 处理单张图像：读取、执行操作、写出。
///
/// # Arguments
///
/// * `input` - 源图像路径。
/// * `output` - 结果图像路径，格式由扩展名决定。
/// * `action` - 要执行的操作。
/// * `force` - 目标文件已存在时是否覆盖。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `force`。
/// * 无法读取或解码输入图像。
/// * 操作执行失败 (例如裁剪框超出图像)。
/// * 无法写入目标图像文件。
pub fn process_image(input: &Path, output: &Path, action: &Action, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !output.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        output.to_string_lossy().red().bold()
    );

    let grid = read_image(input).with_context(|| {
        format!(
            "Unable to read image file: {}",
            input.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Loaded {} ({}x{})",
        input.display(),
        grid.width(),
        grid.height()
    );

    let image = RgbImage::try_from(&grid).with_context(|| {
        format!(
            "Image has no usable pixel data: {}",
            input.to_string_lossy().red().bold()
        )
    })?;

    let edited = actions::apply(action, image).with_context(|| {
        format!(
            "Failed to apply {} to {}",
            action.name().red().bold(),
            input.to_string_lossy().red().bold()
        )
    })?;

    write_image(output, &PixelGrid::from(&edited)).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    Ok(())
}
