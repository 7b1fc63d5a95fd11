//! # 解码结果 Surface
//!
//! ## 设计思路
//!
//! `Surface` 是解码器产出的“内存像素缓冲 + 布局描述”，下游渲染只依赖它。
//! 解码器返回非空结果并不代表 surface 一定可用，因此提供 `status()` 作为完整性探测，
//! 由结果组装阶段统一调用。
//!
//! ## 实现思路
//!
//! - 像素布局仅两种：带 alpha 的 `Rgba32` 与不带 alpha 的 `Rgb24`。
//! - 所有权：`Image` 与调用方通过 `Arc` 共享，最后一个持有者释放时销毁像素数据。

use std::sync::Arc;

use image::DynamicImage;
use serde::Serialize;

/// 单边最大像素数，超过即视为无效尺寸。
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// 共享所有权的 surface 句柄。
pub type SharedSurface = Arc<Surface>;

/// 像素布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceFormat {
    /// 每像素 4 字节：R、G、B、A。
    Rgba32,
    /// 每像素 3 字节：R、G、B。
    Rgb24,
}

impl SurfaceFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba32 => 4,
            Self::Rgb24 => 3,
        }
    }
}

/// 完整性探测结果。
///
/// `Success` 之外的每个值都对应一段人类可读描述，会被嵌入到错误文案中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceStatus {
    Success,
    InvalidSize,
    InvalidStride,
    InvalidData,
}

impl SurfaceStatus {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Success => "no error has occurred",
            Self::InvalidSize => "invalid value (typically too big) for the size of the input",
            Self::InvalidStride => "invalid value for stride",
            Self::InvalidData => "pixel buffer length does not match the surface layout",
        }
    }
}

/// 解码后的像素缓冲。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    stride: usize,
    format: SurfaceFormat,
    data: Vec<u8>,
}

impl Surface {
    /// 以给定布局包装原始像素；不做校验，校验交给 `status()`。
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        format: SurfaceFormat,
        data: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            stride,
            format,
            data,
        }
    }

    /// 将解码器输出转换为紧密排列的 surface。
    ///
    /// `with_alpha` 决定目标布局，而不是源图像是否真的有 alpha 通道。
    pub fn from_dynamic(image: DynamicImage, with_alpha: bool) -> Self {
        let (width, height) = (image.width(), image.height());
        let (format, data) = if with_alpha {
            (SurfaceFormat::Rgba32, image.into_rgba8().into_raw())
        } else {
            (SurfaceFormat::Rgb24, image.into_rgb8().into_raw())
        };
        let stride = width as usize * format.bytes_per_pixel();

        Self::from_raw(width, height, stride, format, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 完整性探测。
    pub fn status(&self) -> SurfaceStatus {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_SURFACE_DIMENSION
            || self.height > MAX_SURFACE_DIMENSION
        {
            return SurfaceStatus::InvalidSize;
        }

        let min_stride = self.width as usize * self.format.bytes_per_pixel();
        if self.stride < min_stride {
            return SurfaceStatus::InvalidStride;
        }

        match self.stride.checked_mul(self.height as usize) {
            Some(expected) if expected == self.data.len() => SurfaceStatus::Success,
            _ => SurfaceStatus::InvalidData,
        }
    }
}
