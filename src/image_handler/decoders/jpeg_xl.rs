//! JPEG-XL 后端，委托 `jxl-oxide`。
//!
//! 只渲染第一帧；`jxl-oxide` 输出平面 f32 通道，这里交织为 8 位 RGBA。

use std::fs::File;
use std::io::{BufReader, Cursor};

use jxl_oxide::{JxlImage, PixelFormat};

use super::DecodeLimits;
use crate::image_handler::source::DecodeInput;
use crate::image_handler::surface::{Surface, SurfaceFormat};
use crate::image_handler::ImageError;

pub(super) fn decode(
    input: DecodeInput<'_>,
    limits: &DecodeLimits,
) -> Result<Surface, ImageError> {
    let image = match input {
        DecodeInput::Bytes(data) => JxlImage::builder().read(Cursor::new(data)),
        DecodeInput::Path(path) => {
            let file = File::open(path).map_err(|e| {
                ImageError::Decode(format!("cannot open {}: {}", path.display(), e))
            })?;
            JxlImage::builder().read(BufReader::new(file))
        }
    }
    .map_err(|e| ImageError::Decode(format!("JXL header error: {}", e)))?;

    let (width, height) = (image.width(), image.height());
    limits.check_pixels(width, height)?;

    let channels = match image.pixel_format() {
        PixelFormat::Gray => 1,
        PixelFormat::Graya => 2,
        PixelFormat::Rgb => 3,
        PixelFormat::Rgba => 4,
        other => {
            return Err(ImageError::Decode(format!(
                "unsupported JXL pixel format {:?}",
                other
            )));
        }
    };

    let render = image
        .render_frame(0)
        .map_err(|e| ImageError::Decode(format!("JXL render error: {}", e)))?;
    let planes = render.image_planar();

    let pixels = width as usize * height as usize;
    let samples: Vec<&[f32]> = planes.iter().take(channels).map(|p| p.buf()).collect();
    if samples.len() < channels || samples.iter().any(|s| s.len() < pixels) {
        return Err(ImageError::Decode(
            "JXL render produced fewer samples than expected".to_string(),
        ));
    }

    let data = interleave_rgba(&samples, pixels);
    let stride = width as usize * SurfaceFormat::Rgba32.bytes_per_pixel();

    Ok(Surface::from_raw(width, height, stride, SurfaceFormat::Rgba32, data))
}

/// 将 1~4 个 f32 平面交织为 RGBA8，灰度复制到三个颜色通道，缺失 alpha 视为不透明。
fn interleave_rgba(planes: &[&[f32]], pixels: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels * 4);

    for i in 0..pixels {
        let sample = |c: usize| to_u8(planes[c][i]);
        let (r, g, b, a) = match planes.len() {
            1 => (sample(0), sample(0), sample(0), 255),
            2 => (sample(0), sample(0), sample(0), sample(1)),
            3 => (sample(0), sample(1), sample(2), 255),
            _ => (sample(0), sample(1), sample(2), sample(3)),
        };
        out.extend_from_slice(&[r, g, b, a]);
    }

    out
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
