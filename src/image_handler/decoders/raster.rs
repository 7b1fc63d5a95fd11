//! PNG / JPEG / BMP / WEBP 后端，统一委托 `image` crate。

use std::io::{BufRead, Cursor, Seek};

use image::{ImageReader, Limits};

use super::DecodeLimits;
use crate::image_handler::source::DecodeInput;
use crate::image_handler::surface::Surface;
use crate::image_handler::{ImageError, ImageFormat};

pub(super) fn decode(
    codec: image::ImageFormat,
    format: ImageFormat,
    input: DecodeInput<'_>,
    limits: &DecodeLimits,
) -> Result<Surface, ImageError> {
    match input {
        DecodeInput::Bytes(data) => {
            let reader = ImageReader::new(Cursor::new(data));
            decode_reader(reader, codec, format, limits)
        }
        DecodeInput::Path(path) => {
            let reader = ImageReader::open(path).map_err(|e| {
                ImageError::Decode(format!("cannot open {}: {}", path.display(), e))
            })?;
            decode_reader(reader, codec, format, limits)
        }
    }
}

fn decode_reader<R: BufRead + Seek>(
    mut reader: ImageReader<R>,
    codec: image::ImageFormat,
    format: ImageFormat,
    limits: &DecodeLimits,
) -> Result<Surface, ImageError> {
    // 格式已由识别阶段确定，不再按扩展名或内容二次猜测
    reader.set_format(codec);

    let mut reader_limits = Limits::default();
    reader_limits.max_alloc = Some(limits.max_alloc);
    reader.limits(reader_limits);

    let decoded = reader.decode()?;
    limits.check_pixels(decoded.width(), decoded.height())?;

    Ok(Surface::from_dynamic(decoded, format.default_has_alpha()))
}
