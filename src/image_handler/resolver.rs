//! # 格式识别
//!
//! ## 设计思路
//!
//! 以“速度优先、准确兜底”的分层策略决定调用哪个解码器：
//! 1. 路径后缀命中已知扩展名（小写或全大写）→ 直接信任扩展名，不读取内容
//! 2. 未命中 → 调用内容探测器，按描述文本映射格式
//! 3. 仍无法识别 → `Unrecognized`，不做任何解码尝试
//!
//! 内存字节入口只接受显式的 PNG 标签，不做内容探测。
//! 命中未编译（或被关闭）的可选格式时立即返回 `FormatDisabled`。

use std::path::Path;

use super::classifier::ContentClassifier;
use super::{Capabilities, ImageError, ImageFormat};

/// 仅通过扩展名识别格式。
///
/// 比较的是路径字符串的后缀，大小写只接受规范小写与全大写两种写法。
pub fn format_from_extension(path: &Path) -> Option<ImageFormat> {
    let path = path.to_string_lossy();

    ImageFormat::ALL.into_iter().find(|format| {
        format.extensions().iter().any(|ext| {
            path.ends_with(ext) || path.ends_with(ext.to_uppercase().as_str())
        })
    })
}

/// 路径入口的完整识别流程。
pub fn resolve_path(
    path: &Path,
    classifier: &dyn ContentClassifier,
    capabilities: Capabilities,
) -> Result<ImageFormat, ImageError> {
    let format = match format_from_extension(path) {
        Some(format) => format,
        None => {
            // 探测开销大，只在扩展名无法识别时使用
            let classification = classifier.classify(path)?;
            classification.format().ok_or_else(|| {
                log::warn!(
                    "⚠️ 内容探测无法识别格式 - 路径: {} 描述: {}",
                    path.display(),
                    classification.description()
                );
                ImageError::Unrecognized
            })?
        }
    };

    ensure_supported(format, capabilities)
}

/// 字节入口的识别：只接受 PNG。
pub fn resolve_buffer(
    format: ImageFormat,
    capabilities: Capabilities,
) -> Result<ImageFormat, ImageError> {
    match format {
        ImageFormat::Png => ensure_supported(format, capabilities),
        _ => Err(ImageError::UnsupportedInput),
    }
}

fn ensure_supported(
    format: ImageFormat,
    capabilities: Capabilities,
) -> Result<ImageFormat, ImageError> {
    if capabilities.supports(format) {
        Ok(format)
    } else {
        Err(ImageError::FormatDisabled)
    }
}
