//! # 图片加载分发器 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  调用方：Image::from_path(path) / Image::from_bytes(..)   │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ 同步构造，失败只体现在 success()/error()
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓          image_handler                           │
//! │                                                          │
//! │  ┌─ resolver ──── 扩展名快速匹配 / 内容探测兜底           │
//! │  │    └─ classifier  infer 签名探测 + 描述文本解析        │
//! │  ├─ decoders ──── PNG/JPEG/BMP/WEBP (image)              │
//! │  │                JPEG-XL (jxl-oxide, feature = jpeg-xl) │
//! │  └─ loaded ────── surface 完整性探测 + Arc 共享所有权     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`image_handler`] | 格式识别、解码分发、结果组装 |
//!
//! 常用类型在 crate 根重新导出。

pub mod image_handler;

pub use image_handler::{
    Capabilities, ErrorKind, Image, ImageError, ImageFormat, ImageLoader, ImageSource,
    LoadReport, LoadStage, LoaderConfig, SharedSurface, Surface, SurfaceFormat, SurfaceStatus,
};
