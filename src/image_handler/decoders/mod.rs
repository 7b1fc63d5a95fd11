//! # 解码器分发表
//!
//! ## 设计思路
//!
//! 格式集合固定且很小，因此用枚举分支做静态分发，而不是 trait 对象。
//! 每个分支相互独立：新增格式只需补一个分支，不影响其他分支。
//!
//! 所有后端遵循同一契约：`字节或路径 → Surface 或错误`，二者必居其一。
//! 可选格式的可用性在构建分发表时注入，命中不可用分支返回固定错误。

mod raster;

#[cfg(feature = "jpeg-xl")]
mod jpeg_xl;

use super::source::DecodeInput;
use super::surface::Surface;
use super::{Capabilities, ImageError, ImageFormat, LoaderConfig};

/// 解码资源上限。
#[derive(Debug, Clone, Copy)]
pub(crate) struct DecodeLimits {
    pub(crate) max_pixels: u64,
    pub(crate) max_alloc: u64,
}

impl DecodeLimits {
    pub(crate) fn from_config(config: &LoaderConfig) -> Self {
        Self {
            max_pixels: config.max_decoded_pixels,
            max_alloc: config.max_decoded_bytes(),
        }
    }

    /// 校验像素数量是否超过配置上限。
    pub(crate) fn check_pixels(&self, width: u32, height: u32) -> Result<(), ImageError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.max_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "image too large: {} pixels (limit: {} pixels)",
                pixels, self.max_pixels
            )));
        }
        Ok(())
    }
}

/// 格式 → 解码调用的静态映射。
#[derive(Debug, Clone, Copy)]
pub struct DecoderTable {
    capabilities: Capabilities,
    limits: DecodeLimits,
}

impl DecoderTable {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            capabilities: config.capabilities.effective(),
            limits: DecodeLimits::from_config(config),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// 调用与格式对应的解码器。
    pub fn decode(
        &self,
        format: ImageFormat,
        input: DecodeInput<'_>,
    ) -> Result<Surface, ImageError> {
        // 识别阶段已做过同样检查，这里兜住直接调用分发表的情况
        if !self.capabilities.supports(format) {
            return Err(ImageError::FormatDisabled);
        }

        let codec = match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::JpegXl => return self.decode_jpeg_xl(input),
        };

        raster::decode(codec, format, input, &self.limits)
    }

    #[cfg(feature = "jpeg-xl")]
    fn decode_jpeg_xl(&self, input: DecodeInput<'_>) -> Result<Surface, ImageError> {
        jpeg_xl::decode(input, &self.limits)
    }

    #[cfg(not(feature = "jpeg-xl"))]
    fn decode_jpeg_xl(&self, _input: DecodeInput<'_>) -> Result<Surface, ImageError> {
        Err(ImageError::FormatDisabled)
    }
}
