//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“解码器看到的输入”解耦：
//! - `ImageSource` 表示调用方给出的输入语义（带格式标签的字节 / 文件路径）
//! - `DecodeInput` 表示分发表交给具体解码器的借用视图

use std::path::{Path, PathBuf};

use super::ImageFormat;

/// 图片输入来源。
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 内存字节 + 显式格式标签。
    Bytes { data: Vec<u8>, format: ImageFormat },
    /// 本地文件路径。
    FilePath(PathBuf),
}

/// 解码器输入。
#[derive(Debug, Clone, Copy)]
pub enum DecodeInput<'a> {
    Bytes(&'a [u8]),
    Path(&'a Path),
}

impl DecodeInput<'_> {
    /// 来源提示（用于日志与诊断）。
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Path(_) => "file",
        }
    }
}
