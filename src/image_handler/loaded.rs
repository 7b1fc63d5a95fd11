//! # 加载结果对象
//!
//! ## 设计思路
//!
//! `Image` 是一次加载的工作单元，也是结果容器：构造时同步完成“识别 → 解码 → 校验”，
//! 构造完成后不可变。所有失败都在内部捕获，只通过 `success()` / `error()` 暴露，
//! 调用方不会拿到 `Err`。
//!
//! ## 状态机
//!
//! ```text
//! Uninitialized → Resolving → Decoding → Validating → Success
//!                     │           │           │
//!                     └───────────┴───────────┴──────→ Failed
//! ```
//!
//! 任一阶段失败都是终态，后续阶段全部跳过，不重试。
//!
//! ## 不变量
//!
//! - `success() == true` 当且仅当 surface 存在且通过完整性探测
//! - `success() == false` 时 `error()` 非空
//! - `mime()` 在格式识别后立即设置，与解码成败无关

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::error::ErrorKind;
use super::handler::default_loader;
use super::surface::{SharedSurface, Surface};
use super::{ImageError, ImageFormat};

/// 加载阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    Uninitialized,
    Resolving,
    Decoding,
    Validating,
    Success,
    Failed,
}

/// 一次加载的结果。
#[derive(Debug, Clone)]
pub struct Image {
    load_success: bool,
    last_error: String,
    error_kind: Option<ErrorKind>,
    has_alpha: bool,
    mime: String,
    format: Option<ImageFormat>,
    surface: Option<SharedSurface>,
    filepath: Option<PathBuf>,
    stage: LoadStage,
    failed_stage: Option<LoadStage>,
}

/// 可序列化的结果摘要，便于日志与跨进程传递。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub success: bool,
    pub mime: String,
    pub has_alpha: bool,
    pub error: String,
    pub error_kind: Option<ErrorKind>,
    pub format: Option<ImageFormat>,
    pub filepath: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub failed_stage: Option<LoadStage>,
}

impl LoadReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Image {
    /// 从文件路径加载（使用默认加载器）。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_surface_loader::Image;
    ///
    /// let image = Image::from_path("/tmp/wallpaper.png");
    /// if image.success() {
    ///     let surface = image.surface().expect("loaded image has a surface");
    ///     println!("{}x{} {}", surface.width(), surface.height(), image.mime());
    /// } else {
    ///     eprintln!("load failed: {}", image.error());
    /// }
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        default_loader().load_path(path)
    }

    /// 从内存字节加载（使用默认加载器）。目前只接受 PNG。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_surface_loader::{Image, ImageFormat};
    ///
    /// let bytes = std::fs::read("/tmp/icon.png")?;
    /// let image = Image::from_bytes(&bytes, ImageFormat::Png);
    /// assert_eq!(image.mime(), "image/png");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn from_bytes(data: &[u8], format: ImageFormat) -> Self {
        default_loader().load_bytes(data, format)
    }

    pub(crate) fn pending(filepath: Option<PathBuf>) -> Self {
        Self {
            load_success: false,
            last_error: String::new(),
            error_kind: None,
            has_alpha: true,
            mime: String::new(),
            format: None,
            surface: None,
            filepath,
            stage: LoadStage::Uninitialized,
            failed_stage: None,
        }
    }

    pub(crate) fn enter(&mut self, stage: LoadStage) {
        self.stage = stage;
    }

    /// 记录已识别的格式：MIME 与 alpha 默认值。
    pub(crate) fn set_format(&mut self, format: ImageFormat) {
        self.format = Some(format);
        self.mime = format.mime().to_string();
        self.has_alpha = format.default_has_alpha();
    }

    /// 终止于当前阶段，记录错误文本。
    pub(crate) fn fail(&mut self, error: ImageError) {
        self.failed_stage = Some(self.stage);
        self.stage = LoadStage::Failed;
        self.error_kind = Some(error.kind());
        self.last_error = error.into();
        self.load_success = false;
    }

    /// 结果组装：解码结果 → 完整性探测 → 采纳 surface。
    ///
    /// 解码失败时不触碰 surface；探测失败时丢弃解码器的输出。
    pub(crate) fn assemble(&mut self, outcome: Result<Surface, ImageError>) {
        let surface = match outcome {
            Ok(surface) => surface,
            Err(error) => return self.fail(error),
        };

        self.enter(LoadStage::Validating);
        let status = surface.status();
        if !status.is_success() {
            return self.fail(ImageError::Surface(status));
        }

        self.surface = Some(Arc::new(surface));
        self.load_success = true;
        self.stage = LoadStage::Success;
    }

    /// 是否完整加载成功。
    pub fn success(&self) -> bool {
        self.load_success
    }

    /// 是否可能含 alpha 通道（格式能力默认值）。
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// 失败时的诊断信息；成功时为空字符串。
    pub fn error(&self) -> &str {
        &self.last_error
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// 共享 surface 句柄；未成功加载时为 `None`。
    pub fn surface(&self) -> Option<SharedSurface> {
        self.surface.clone()
    }

    /// 已识别格式的 MIME；即使解码失败也会保留。
    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// 仅在从路径构造时存在。
    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    pub fn stage(&self) -> LoadStage {
        self.stage
    }

    /// 失败发生在哪个阶段。
    pub fn failed_stage(&self) -> Option<LoadStage> {
        self.failed_stage
    }

    pub fn report(&self) -> LoadReport {
        LoadReport {
            success: self.load_success,
            mime: self.mime.clone(),
            has_alpha: self.has_alpha,
            error: self.last_error.clone(),
            error_kind: self.error_kind,
            format: self.format,
            filepath: self.filepath.as_ref().map(|p| p.display().to_string()),
            width: self.surface.as_ref().map(|s| s.width()),
            height: self.surface.as_ref().map(|s| s.height()),
            failed_stage: self.failed_stage,
        }
    }
}
