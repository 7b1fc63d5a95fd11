//! # 内容探测（magic bytes）
//!
//! ## 设计思路
//!
//! 内容探测比扩展名匹配慢得多，只在扩展名无法识别时作为兜底。
//! 探测器被抽象为单方法 trait，返回“规范类型词 + 原始描述”，
//! 字符串启发式（`XL` / `2000`）集中在 `Classification::format()` 一处。
//!
//! ## 实现思路
//!
//! - `InferClassifier` 只读取文件前 `probe_bytes` 字节，交给 `infer` 判断。
//! - 判断结果转写成与 libmagic 相同风格的描述文本，例如 `PNG image data`。
//! - 描述文本的第一个空白分隔的词作为规范类型名。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{ImageError, ImageFormat};

/// 内容探测器。
pub trait ContentClassifier: Send + Sync {
    /// 读取 `path` 的内容并返回描述。
    fn classify(&self, path: &Path) -> Result<Classification, ImageError>;
}

/// 探测结果：规范类型词与完整描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    type_name: String,
    description: String,
}

impl Classification {
    /// 从描述文本构建，取第一个空白分隔的词作为类型名。
    pub fn from_label(label: impl Into<String>) -> Self {
        let description = label.into();
        let type_name = description
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            type_name,
            description,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 将描述映射为格式。
    ///
    /// `JPEG` 开头的描述存在重载：
    /// - 含 `XL` → JPEG-XL（容器前导与 JPEG 相似）
    /// - 含 `2000` → 拒绝，JPEG 2000 不能按普通 JPEG 解码
    /// - 其余 → 普通 JPEG
    pub fn format(&self) -> Option<ImageFormat> {
        match self.type_name.as_str() {
            "PNG" => Some(ImageFormat::Png),
            "BMP" => Some(ImageFormat::Bmp),
            "JPEG" if self.description.contains("XL") => Some(ImageFormat::JpegXl),
            "JPEG" if self.description.contains("2000") => None,
            "JPEG" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

/// 基于 `infer` 的默认探测器。
#[derive(Debug, Clone)]
pub struct InferClassifier {
    probe_bytes: usize,
}

impl InferClassifier {
    pub fn new(probe_bytes: usize) -> Self {
        Self {
            probe_bytes: probe_bytes.max(1),
        }
    }

    /// 对已读入的前导字节做探测。
    pub fn classify_bytes(bytes: &[u8]) -> Classification {
        if bytes.is_empty() {
            return Classification::from_label("empty");
        }

        let label = match infer::get(bytes) {
            Some(kind) => Self::describe(kind.mime_type(), kind.extension()),
            None => "data".to_string(),
        };

        Classification::from_label(label)
    }

    fn describe(mime: &str, extension: &str) -> String {
        match mime {
            "image/png" => "PNG image data".to_string(),
            "image/jpeg" => "JPEG image data".to_string(),
            "image/jxl" => "JPEG XL codestream".to_string(),
            "image/jp2" | "image/jpx" | "image/jpm" => "JPEG 2000 image data".to_string(),
            "image/bmp" => "BMP image data".to_string(),
            "image/gif" => "GIF image data".to_string(),
            "image/webp" => "RIFF (little-endian) data, Web/P image".to_string(),
            _ => format!("{} data ({})", extension.to_uppercase(), mime),
        }
    }
}

impl Default for InferClassifier {
    fn default() -> Self {
        Self::new(8192)
    }
}

impl ContentClassifier for InferClassifier {
    fn classify(&self, path: &Path) -> Result<Classification, ImageError> {
        let file = File::open(path).map_err(|e| {
            ImageError::FileSystem(format!("cannot open `{}' ({})", path.display(), e))
        })?;

        let mut probe = Vec::with_capacity(self.probe_bytes);
        file.take(self.probe_bytes as u64)
            .read_to_end(&mut probe)
            .map_err(|e| {
                ImageError::FileSystem(format!("cannot read `{}' ({})", path.display(), e))
            })?;

        let classification = Self::classify_bytes(&probe);
        log::debug!(
            "🔎 内容探测 - 路径: {} 描述: {}",
            path.display(),
            classification.description()
        );

        Ok(classification)
    }
}
