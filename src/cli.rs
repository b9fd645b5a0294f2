//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构：全局选项 (输入图像、输出目录、日志级别)
//! 加上一个表示编辑操作的子命令。解析结果就是整次运行的配置，
//! 由 `main` 构造一次后传入 [`crate::handler::run`]。

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 一款简单的图像编辑命令行工具：读取图像，执行一个调整或变换，再写回磁盘。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款简单的图像编辑命令行工具。支持 BMP (内置 24 位编解码器)、PNG 和 JPEG，\n对每张输入图像执行一个调整或几何变换，并把结果写入目标目录。"
)]
pub struct Cli {
    /// 输出大量调试信息。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub debug: bool,

    /// 输出处理进度。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 要处理的源图像，可以给出多个。
    #[arg(short, long, num_args = 1.., required = true)]
    pub images: Vec<PathBuf>,

    /// 保存结果图像的目标目录。
    #[arg(long)]
    pub dest: PathBuf,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(subcommand)]
    pub action: Action,
}

/// 可用的编辑操作。
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Action {
    /// 调整亮度，范围 [-255, 255]。
    Brightness {
        #[arg(allow_negative_numbers = true, value_parser = clap::value_parser!(i16).range(-255..=255))]
        value: i16,
    },

    /// 按系数调整对比度。
    Contrast {
        #[arg(allow_negative_numbers = true)]
        factor: f32,
    },

    /// 按系数调整饱和度。
    Saturation { factor: f32 },

    /// 裁剪到矩形 (x1, y1) - (x2, y2)，右边和下边不包含在内。
    Crop { x1: u32, y1: u32, x2: u32, y2: u32 },

    /// 水平或垂直翻转。
    Flip {
        #[arg(value_enum)]
        mode: FlipMode,
    },

    /// 转换为灰度。
    Grayscale,

    /// 反色。
    Invert,

    /// 缩放到指定尺寸。
    Resize { width: u32, height: u32 },

    /// 绕图像中心逆时针旋转，单位为度，画布尺寸不变。
    Rotate {
        #[arg(allow_negative_numbers = true)]
        angle: i32,
    },
}

impl Cli {
    /// 由 `--debug` / `--verbose` 决定的日志级别，默认只输出警告和错误。
    pub fn log_level(&self) -> log::Level {
        if self.debug {
            log::Level::Debug
        } else if self.verbose {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipMode {
    Horizontal,
    Vertical,
}

impl Action {
    /// 操作的小写名称，用于生成输出文件名。
    pub fn name(&self) -> &'static str {
        match self {
            Action::Brightness { .. } => "brightness",
            Action::Contrast { .. } => "contrast",
            Action::Saturation { .. } => "saturation",
            Action::Crop { .. } => "crop",
            Action::Flip { .. } => "flip",
            Action::Grayscale => "grayscale",
            Action::Invert => "invert",
            Action::Resize { .. } => "resize",
            Action::Rotate { .. } => "rotate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brightness_with_negative_value() {
        let cli = Cli::try_parse_from([
            "pixel_pioneers",
            "-i",
            "a.bmp",
            "b.png",
            "--dest",
            "out",
            "brightness",
            "-40",
        ])
        .unwrap();
        assert_eq!(cli.images.len(), 2);
        assert_eq!(cli.action, Action::Brightness { value: -40 });
        assert_eq!(cli.action.name(), "brightness");
        assert!(!cli.force);
        assert_eq!(cli.log_level(), log::Level::Warn);
    }

    #[test]
    fn rejects_out_of_range_brightness() {
        let result = Cli::try_parse_from([
            "pixel_pioneers",
            "-i",
            "a.bmp",
            "--dest",
            "out",
            "brightness",
            "300",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_crop_and_flip() {
        let cli = Cli::try_parse_from([
            "pixel_pioneers", "-i", "a.bmp", "--dest", "out", "crop", "1", "2", "3", "4",
        ])
        .unwrap();
        assert_eq!(
            cli.action,
            Action::Crop {
                x1: 1,
                y1: 2,
                x2: 3,
                y2: 4
            }
        );

        let cli = Cli::try_parse_from([
            "pixel_pioneers", "-i", "a.bmp", "--dest", "out", "-f", "flip", "vertical",
        ])
        .unwrap();
        assert_eq!(
            cli.action,
            Action::Flip {
                mode: FlipMode::Vertical
            }
        );
        assert!(cli.force);
    }

    #[test]
    fn verbosity_flags_pick_log_level() {
        let cli = Cli::try_parse_from([
            "pixel_pioneers", "-v", "-i", "a.bmp", "--dest", "out", "grayscale",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), log::Level::Info);

        let cli = Cli::try_parse_from([
            "pixel_pioneers", "-i", "a.bmp", "--dest", "out", "rotate", "-90", "--debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), log::Level::Debug);
        assert_eq!(cli.action, Action::Rotate { angle: -90 });
    }

    #[test]
    fn debug_and_verbose_conflict() {
        let result = Cli::try_parse_from([
            "pixel_pioneers", "-d", "-v", "-i", "a.bmp", "--dest", "out", "invert",
        ]);
        assert!(result.is_err());
    }
}
