use std::io;
use std::path::{Path, PathBuf};

/// BMP 读写过程中可能出现的全部错误。
#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupted BMP header: {0}")]
    CorruptedHeader(String),

    #[error("unsupported BMP variant: {0}")]
    UnsupportedVariant(String),

    #[error("truncated pixel data: need {needed} bytes, got {available}")]
    TruncatedData { needed: usize, available: usize },

    #[error("invalid pixel data: {0}")]
    InvalidPixelData(String),
}

impl BmpError {
    /// 把读取时的 I/O 错误归类：路径不存在单独报告为 `FileNotFound`。
    pub(crate) fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            BmpError::FileNotFound(path.to_path_buf())
        } else {
            BmpError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn from_write(path: &Path, source: io::Error) -> Self {
        BmpError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
