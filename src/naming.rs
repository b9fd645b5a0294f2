//! # 输出路径模块
//!
//! 输出文件放在目标目录下，文件名为 `<原文件名>_<操作名>.<原扩展名>`，
//! 因此输出格式总是与输入格式相同。

use std::path::{Path, PathBuf};

/// 根据输入路径和操作名生成输出路径。
///
/// ```
/// use pixel_pioneers::naming::output_path;
/// use std::path::Path;
///
/// let out = output_path(Path::new("photos/cat.bmp"), Path::new("out"), "invert");
/// assert_eq!(out, Path::new("out/cat_invert.bmp"));
/// ```
pub fn output_path(input: &Path, dest_dir: &Path, action: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut file_name = format!("{}_{}", stem, action);
    if let Some(extension) = input.extension() {
        file_name.push('.');
        file_name.push_str(&extension.to_string_lossy());
    }

    dest_dir.join(file_name)
}
