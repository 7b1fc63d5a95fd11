//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageLoader` 只负责流程编排，持有配置、内容探测器与解码器分发表。
//! 处理链路固定为：
//! 1. 识别格式（扩展名优先，内容探测兜底）
//! 2. 分发到对应解码器
//! 3. 组装结果并做 surface 完整性校验
//!
//! ## 实现思路
//!
//! - 数据单向流动，任何阶段都不回调识别器。
//! - 各加载互不共享可变状态，加载器本身可在多线程间共享。
//! - 记录阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use once_cell::sync::Lazy;

use super::classifier::{ContentClassifier, InferClassifier};
use super::decoders::DecoderTable;
use super::loaded::{Image, LoadStage};
use super::resolver;
use super::source::{DecodeInput, ImageSource};
use super::{ImageError, ImageFormat, LoaderConfig};

static DEFAULT_LOADER: Lazy<ImageLoader> = Lazy::new(|| ImageLoader::new(LoaderConfig::default()));

/// `Image::from_path` / `Image::from_bytes` 使用的进程级加载器。
pub(crate) fn default_loader() -> &'static ImageLoader {
    &DEFAULT_LOADER
}

/// 图片加载器。
pub struct ImageLoader {
    config: LoaderConfig,
    classifier: Box<dyn ContentClassifier>,
    decoders: DecoderTable,
}

impl ImageLoader {
    /// 使用基于 `infer` 的默认内容探测器。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_surface_loader::{ImageLoader, LoaderConfig};
    ///
    /// let loader = ImageLoader::new(LoaderConfig::default());
    /// let image = loader.load_path("/tmp/photo");
    /// println!("{} {}", image.mime(), image.success());
    /// ```
    pub fn new(config: LoaderConfig) -> Self {
        let classifier = InferClassifier::new(config.sniff_probe_bytes);
        Self::with_classifier(config, classifier)
    }

    /// 注入自定义内容探测器。
    pub fn with_classifier(
        config: LoaderConfig,
        classifier: impl ContentClassifier + 'static,
    ) -> Self {
        let decoders = DecoderTable::new(&config);
        Self {
            config,
            classifier: Box::new(classifier),
            decoders,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> Image {
        self.load(ImageSource::FilePath(path.as_ref().to_path_buf()))
    }

    pub fn load_bytes(&self, data: &[u8], format: ImageFormat) -> Image {
        let mut image = Image::pending(None);
        let resolve = |loader: &Self| {
            resolver::resolve_buffer(format, loader.decoders.capabilities())
        };
        self.run(&mut image, resolve, DecodeInput::Bytes(data));
        image
    }

    /// 处理主入口：任意来源 → `Image`。
    pub fn load(&self, source: ImageSource) -> Image {
        match &source {
            ImageSource::Bytes { data, format } => self.load_bytes(data, *format),
            ImageSource::FilePath(path) => {
                let mut image = Image::pending(Some(path.clone()));
                let resolve = |loader: &Self| loader.resolve_path(path);
                self.run(&mut image, resolve, DecodeInput::Path(path));
                image
            }
        }
    }

    fn resolve_path(&self, path: &Path) -> Result<ImageFormat, ImageError> {
        self.validate_file_size(path)?;
        resolver::resolve_path(path, self.classifier.as_ref(), self.decoders.capabilities())
    }

    /// 文件存在时按 metadata 做体积限制；不存在的文件交给后续阶段报告。
    fn validate_file_size(&self, path: &Path) -> Result<(), ImageError> {
        let Ok(metadata) = std::fs::metadata(path) else {
            return Ok(());
        };

        if metadata.len() > self.config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "file too large: {:.2} MB (limit: {:.2} MB)",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    fn run<F>(&self, image: &mut Image, resolve: F, input: DecodeInput<'_>)
    where
        F: FnOnce(&Self) -> Result<ImageFormat, ImageError>,
    {
        let total_start = Instant::now();
        let source_hint = input.hint();

        image.enter(LoadStage::Resolving);
        let format = match resolve(self) {
            Ok(format) => format,
            Err(error) => {
                log::warn!("⚠️ 格式识别失败 - 来源: {} 错误: {}", source_hint, error);
                return image.fail(error);
            }
        };
        image.set_format(format);

        image.enter(LoadStage::Decoding);
        let decode_start = Instant::now();
        let outcome = self.decoders.decode(format, input);
        let decode_ms = decode_start.elapsed().as_millis();

        image.assemble(outcome);

        if image.success() {
            log::info!(
                "✅ 图片加载成功 - 来源: {} 格式: {} 解码: {}ms 总耗时: {}ms",
                source_hint,
                format,
                decode_ms,
                total_start.elapsed().as_millis()
            );
        } else {
            log::warn!(
                "⚠️ 图片加载失败 - 来源: {} 格式: {} 阶段: {:?} 错误: {}",
                source_hint,
                format,
                image.failed_stage(),
                image.error()
            );
        }
    }
}
