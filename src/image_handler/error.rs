//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载“识别 → 解码 → 校验”链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 其中部分文案是对外契约（调用方会直接比对），不要随意修改：
//! - `UnsupportedInput`
//! - `Unrecognized`
//! - `FormatDisabled`

use serde::Serialize;

use super::surface::SurfaceStatus;

/// 图片加载统一错误类型。
///
/// 该类型只在内部阶段之间传播；对外由 `Image` 捕获为 `error()` 文本。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// 内存入口只接受 PNG。
    #[error("Currently only PNG images are supported for embedding")]
    UnsupportedInput,

    /// 扩展名与内容探测都无法给出已知格式。
    #[error("unrecognized image")]
    Unrecognized,

    /// 格式已识别，但对应解码器未编译进来（或被配置关闭）。
    #[error("image-surface-loader compiled without JXL support")]
    FormatDisabled,

    /// 解码器报告的原始错误，原样透传。
    #[error("{0}")]
    Decode(String),

    /// 解码器返回了 surface，但完整性探测失败。
    #[error("Could not create surface: {}", .0.description())]
    Surface(SurfaceStatus),

    #[error("{0}")]
    FileSystem(String),

    #[error("{0}")]
    ResourceLimit(String),
}

/// 错误分类标签，供调用侧分支判断而无需比对字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedInput,
    Unrecognized,
    FormatDisabled,
    Decode,
    Surface,
    FileSystem,
    ResourceLimit,
}

impl ImageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedInput => ErrorKind::UnsupportedInput,
            Self::Unrecognized => ErrorKind::Unrecognized,
            Self::FormatDisabled => ErrorKind::FormatDisabled,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Surface(_) => ErrorKind::Surface,
            Self::FileSystem(_) => ErrorKind::FileSystem,
            Self::ResourceLimit(_) => ErrorKind::ResourceLimit,
        }
    }
}

impl From<ImageError> for String {
    /// 兼容以字符串记录错误的调用点（`Image::error()`）。
    fn from(error: ImageError) -> Self {
        error.to_string()
    }
}

impl From<image::ImageError> for ImageError {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::Limits(e) => Self::ResourceLimit(e.to_string()),
            other => Self::Decode(other.to_string()),
        }
    }
}
