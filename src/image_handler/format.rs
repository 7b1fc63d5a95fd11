//! # 格式标签
//!
//! 封闭的格式集合。每个变体自带扩展名、MIME 与 alpha 默认值，
//! 新增格式只需在这里和分发表各加一个分支。

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ImageError;

/// 已识别的图片格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Webp,
    JpegXl,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Bmp,
        ImageFormat::Webp,
        ImageFormat::JpegXl,
    ];

    /// 路径快速匹配使用的后缀（小写规范形式，含点号）。
    ///
    /// 匹配时只比较小写与全大写两种写法，`.Png` 这类混合大小写不算命中。
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &[".png"],
            Self::Jpeg => &[".jpg", ".jpeg"],
            Self::Bmp => &[".bmp"],
            Self::Webp => &[".webp"],
            Self::JpegXl => &[".jxl"],
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
            Self::JpegXl => "image/jxl",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mime() == mime)
    }

    /// 格式能力默认值：JPEG 与 BMP 没有原生 alpha。
    pub fn default_has_alpha(self) -> bool {
        !matches!(self, Self::Jpeg | Self::Bmp)
    }

    /// 是否依赖可选的编译期能力。
    pub fn is_optional(self) -> bool {
        matches!(self, Self::JpegXl)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
            Self::JpegXl => "jxl",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = ImageError;

    /// 从外部字符串解析格式标签，忽略大小写与前导点号。
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let tag = tag.trim().trim_start_matches('.').to_lowercase();
        match tag.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "webp" => Ok(Self::Webp),
            "jxl" | "jpegxl" | "jpeg-xl" => Ok(Self::JpegXl),
            _ => Err(ImageError::Unrecognized),
        }
    }
}
