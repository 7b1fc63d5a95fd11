//! # 图片加载模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将“格式识别 → 解码分发 → 结果组装”按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `resolver`：扩展名快速匹配 + 内容探测兜底
//! - `classifier`：内容探测器抽象与描述文本解析
//! - `decoders`：格式 → 解码器的静态分发表
//! - `loaded`：结果对象 `Image` 与结果组装
//! - `handler`：编排整条加载流程
//! - `config/error/format/source/surface`：配置、错误、格式标签、输入模型、像素缓冲
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! Image::from_path / Image::from_bytes
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ resolver.rs（扩展名 → classifier.rs 兜底）
//!    ├─ decoders/（raster: image crate，jpeg_xl: jxl-oxide）
//!    └─ loaded.rs（完整性探测 + 采纳 surface）
//!    ↓
//! 调用方读取 success()/error()/mime()/surface()
//! ```
//!
//! ## 分层职责建议
//!
//! - 新增格式：`format.rs` 与 `decoders/mod.rs` 各补一个分支
//! - 识别策略变更优先改 `resolver.rs`，描述文本启发式只改 `classifier.rs`
//! - 资源上限与可选能力改 `config.rs`

mod classifier;
mod config;
mod decoders;
mod error;
mod format;
mod handler;
mod loaded;
mod resolver;
mod source;
mod surface;

pub use classifier::{Classification, ContentClassifier, InferClassifier};
pub use config::{Capabilities, LoaderConfig};
pub use decoders::DecoderTable;
pub use error::{ErrorKind, ImageError};
pub use format::ImageFormat;
pub use handler::ImageLoader;
pub use loaded::{Image, LoadReport, LoadStage};
pub use resolver::{format_from_extension, resolve_buffer, resolve_path};
pub use source::{DecodeInput, ImageSource};
pub use surface::{MAX_SURFACE_DIMENSION, SharedSurface, Surface, SurfaceFormat, SurfaceStatus};
