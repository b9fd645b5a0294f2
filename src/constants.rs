/// BMP 文件头 (14 字节) 与 BITMAPINFOHEADER (40 字节) 的总大小。
/// 本工具只支持这一种布局，像素数据紧跟在它之后。
pub const BMP_HEADER_SIZE: usize = 54;

/// BITMAPINFOHEADER 的大小 (字节)，写在偏移 14 处。
pub const DIB_HEADER_SIZE: u32 = 40;

/// 文件开头的两字节签名。
pub const BMP_SIGNATURE: [u8; 2] = *b"BM";

/// 唯一支持的位深：24 位 BGR。
pub const BITS_PER_PIXEL: u16 = 24;

/// 每个像素占用的字节数。
pub const BYTES_PER_PIXEL: usize = 3;

/// 每条扫描线都要补齐到的字节边界。
pub const ROW_ALIGNMENT: usize = 4;

/// 亮度调整值的允许范围 (闭区间)。
pub const BRIGHTNESS_RANGE: std::ops::RangeInclusive<i16> = -255..=255;

/// 灰度转换使用的 R、G、B 权重。
pub const GRAYSCALE_WEIGHTS: [f32; 3] = [0.2989, 0.5870, 0.1140];
