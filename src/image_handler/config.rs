//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `LoaderConfig`，保证运行时行为可观测、可调整、可测试。
//! 可选格式（目前只有 JPEG-XL）分两层控制：
//! - 编译期：cargo feature `jpeg-xl` 决定解码器是否存在
//! - 运行期：`Capabilities` 可以在已编译的前提下主动关闭
//!
//! 两者取交集后注入分发表，运行时命中不可用格式时返回固定错误，而不是分发失败。

use super::ImageFormat;

/// 可选格式能力开关。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub jpeg_xl: bool,
}

impl Capabilities {
    /// 当前构建实际具备的能力。
    pub const fn detect() -> Self {
        Self {
            jpeg_xl: cfg!(feature = "jpeg-xl"),
        }
    }

    /// 与构建能力取交集：运行期只能关闭，不能凭空打开。
    pub fn effective(self) -> Self {
        let built = Self::detect();
        Self {
            jpeg_xl: self.jpeg_xl && built.jpeg_xl,
        }
    }

    pub fn supports(self, format: ImageFormat) -> bool {
        if format.is_optional() {
            self.jpeg_xl
        } else {
            true
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// 图片加载配置。
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// 路径输入允许的最大文件体积（字节），在探测与解码前检查。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 内容探测读取的前导字节数。
    pub sniff_probe_bytes: usize,
    /// 可选格式能力。
    pub capabilities: Capabilities,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            sniff_probe_bytes: 8192,
            capabilities: Capabilities::default(),
        }
    }
}

impl LoaderConfig {
    /// 估算解码时允许的最大内存（按 RGBA 计算）。
    pub(crate) fn max_decoded_bytes(&self) -> u64 {
        self.max_decoded_pixels.saturating_mul(4)
    }
}
