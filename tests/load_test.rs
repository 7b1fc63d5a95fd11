// End-to-end loading through real files on disk.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use image_surface_loader::{
    Capabilities, ErrorKind, Image, ImageFormat, ImageLoader, LoadStage, LoaderConfig,
    SurfaceFormat,
};
use tempfile::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rgba_fixture() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(5, 4, |x, y| {
        Rgba([x as u8 * 40, y as u8 * 60, 90, 200])
    }))
}

fn rgb_fixture() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 3, Rgb([200, 100, 50])))
}

fn write_fixture(dir: &TempDir, name: &str, format: image::ImageFormat) -> PathBuf {
    let path = dir.path().join(name);
    let img = match format {
        image::ImageFormat::Jpeg | image::ImageFormat::Bmp => rgb_fixture(),
        _ => rgba_fixture(),
    };
    img.save_with_format(&path, format).expect("write fixture");
    path
}

fn write_raw(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write raw fixture");
    path
}

fn assert_invariants(image: &Image) {
    if image.success() {
        assert!(image.error().is_empty());
        assert!(image.surface().is_some());
    } else {
        assert!(!image.error().is_empty());
        assert!(image.surface().is_none());
    }
}

#[test]
fn png_by_path_and_by_bytes_agree() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "icon.png", image::ImageFormat::Png);

    let from_path = Image::from_path(&path);
    let bytes = std::fs::read(&path).unwrap();
    let from_bytes = Image::from_bytes(&bytes, ImageFormat::Png);

    assert_invariants(&from_path);
    assert_invariants(&from_bytes);
    assert!(from_path.success(), "{}", from_path.error());
    assert_eq!(from_path.success(), from_bytes.success());
    assert_eq!(from_path.mime(), "image/png");
    assert_eq!(from_bytes.mime(), "image/png");
    assert!(from_path.has_alpha());
    assert_eq!(from_path.filepath(), Some(path.as_path()));
    assert_eq!(from_bytes.filepath(), None);

    let surface = from_path.surface().unwrap();
    assert_eq!((surface.width(), surface.height()), (5, 4));
    assert_eq!(surface.format(), SurfaceFormat::Rgba32);
    assert_eq!(from_bytes.surface().unwrap().data(), surface.data());
}

#[test]
fn jpeg_and_bmp_have_no_alpha() {
    init_logger();
    let dir = TempDir::new().unwrap();

    for (name, format, mime) in [
        ("photo.jpg", image::ImageFormat::Jpeg, "image/jpeg"),
        ("photo.JPEG", image::ImageFormat::Jpeg, "image/jpeg"),
        ("legacy.bmp", image::ImageFormat::Bmp, "image/bmp"),
    ] {
        let image = Image::from_path(write_fixture(&dir, name, format));
        assert_invariants(&image);
        assert!(image.success(), "{}: {}", name, image.error());
        assert!(!image.has_alpha(), "{}", name);
        assert_eq!(image.mime(), mime);
        assert_eq!(image.surface().unwrap().format(), SurfaceFormat::Rgb24);
    }
}

#[test]
fn webp_by_extension_keeps_alpha_default() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let image = Image::from_path(write_fixture(&dir, "sticker.webp", image::ImageFormat::WebP));

    assert!(image.success(), "{}", image.error());
    assert!(image.has_alpha());
    assert_eq!(image.mime(), "image/webp");
}

#[test]
fn extensionless_files_are_sniffed() {
    init_logger();
    let dir = TempDir::new().unwrap();

    for (name, format, expected) in [
        ("png-blob", image::ImageFormat::Png, ImageFormat::Png),
        ("jpeg-blob.dat", image::ImageFormat::Jpeg, ImageFormat::Jpeg),
        ("bmp-blob.Png", image::ImageFormat::Bmp, ImageFormat::Bmp),
    ] {
        let image = Image::from_path(write_fixture(&dir, name, format));
        assert!(image.success(), "{}: {}", name, image.error());
        assert_eq!(image.format(), Some(expected), "{}", name);
        assert_eq!(image.has_alpha(), expected.default_has_alpha());
    }
}

#[test]
fn webp_content_without_extension_is_unrecognized() {
    let dir = TempDir::new().unwrap();
    let image = Image::from_path(write_fixture(&dir, "sticker", image::ImageFormat::WebP));

    assert_eq!(image.error(), "unrecognized image");
    assert_eq!(image.failed_stage(), Some(LoadStage::Resolving));
}

#[test]
fn jpeg_2000_signature_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut jp2 = vec![
        0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
    ];
    jp2.extend_from_slice(&[0u8; 32]);
    let image = Image::from_path(write_raw(&dir, "scan.jp2", &jp2));

    assert!(!image.success());
    assert_eq!(image.error(), "unrecognized image");
    assert!(image.mime().is_empty());
}

fn jxl_container() -> Vec<u8> {
    let mut bytes = vec![
        0x00, 0x00, 0x00, 0x0C, b'J', b'X', b'L', b' ', 0x0D, 0x0A, 0x87, 0x0A,
    ];
    bytes.extend_from_slice(&[0u8; 16]);
    bytes
}

#[test]
fn disabled_jpeg_xl_reports_fixed_error() {
    let dir = TempDir::new().unwrap();
    let mut config = LoaderConfig::default();
    config.capabilities = Capabilities { jpeg_xl: false };
    let loader = ImageLoader::new(config);

    for name in ["art.jxl", "art.bin"] {
        let image = loader.load_path(write_raw(&dir, name, &jxl_container()));
        assert_eq!(image.error(), "image-surface-loader compiled without JXL support");
        assert_eq!(image.error_kind(), Some(ErrorKind::FormatDisabled));
        assert!(image.mime().is_empty());
    }
}

#[cfg(feature = "jpeg-xl")]
#[test]
fn sniffed_jpeg_xl_reaches_decoder_when_enabled() {
    let dir = TempDir::new().unwrap();
    let image = Image::from_path(write_raw(&dir, "art.bin", &jxl_container()));

    assert_eq!(image.format(), Some(ImageFormat::JpegXl));
    assert_eq!(image.mime(), "image/jxl");
    assert!(!image.success());
    assert_eq!(image.failed_stage(), Some(LoadStage::Decoding));
}

#[cfg(feature = "jpeg-xl")]
fn encode_jpeg_xl(img: &RgbaImage) -> Vec<u8> {
    use zune_core::bit_depth::BitDepth;
    use zune_core::colorspace::ColorSpace;
    use zune_core::options::EncoderOptions;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let options = EncoderOptions::new(width, height, ColorSpace::RGBA, BitDepth::Eight);
    zune_jpegxl::JxlSimpleEncoder::new(img.as_raw(), options)
        .encode()
        .expect("encode jxl fixture")
}

#[cfg(feature = "jpeg-xl")]
#[test]
fn lossless_jpeg_xl_decodes_to_rgba_surface() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let source = RgbaImage::from_fn(5, 3, |x, y| Rgba([200, x as u8 * 10, 7 + y as u8, 128]));
    let bytes = encode_jpeg_xl(&source);

    for name in ["art.jxl", "art"] {
        let image = Image::from_path(write_raw(&dir, name, &bytes));
        assert_invariants(&image);

        assert!(image.success(), "{}: {}", name, image.error());
        assert!(image.error().is_empty());
        assert_eq!(image.format(), Some(ImageFormat::JpegXl));
        assert_eq!(image.mime(), "image/jxl");
        assert!(image.has_alpha());

        let surface = image.surface().expect("surface present");
        assert_eq!(surface.format(), SurfaceFormat::Rgba32);
        assert_eq!((surface.width(), surface.height()), (5, 3));
        assert_eq!(&surface.data()[..8], &[200, 0, 7, 128, 200, 10, 7, 128]);
        assert_eq!(&surface.data()[..], source.as_raw().as_slice());
    }
}

#[test]
fn corrupted_png_fails_after_resolution() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let png = std::fs::read(write_fixture(&dir, "good.png", image::ImageFormat::Png)).unwrap();
    let truncated = &png[..png.len() / 2];
    let image = Image::from_path(write_raw(&dir, "broken.png", truncated));

    assert_invariants(&image);
    assert!(!image.success());
    assert_eq!(image.mime(), "image/png");
    assert_eq!(image.format(), Some(ImageFormat::Png));
    assert_ne!(image.error_kind(), Some(ErrorKind::Unrecognized));
    assert!(matches!(
        image.failed_stage(),
        Some(LoadStage::Decoding) | Some(LoadStage::Validating)
    ));
}

#[test]
fn missing_file_without_extension_is_a_filesystem_error() {
    let dir = TempDir::new().unwrap();
    let image = Image::from_path(dir.path().join("nothing-here"));

    assert_eq!(image.error_kind(), Some(ErrorKind::FileSystem));
    assert!(image.error().contains("nothing-here"));
}

#[test]
fn oversized_file_is_rejected_before_decode() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "big.png", image::ImageFormat::Png);
    let config = LoaderConfig {
        max_file_size: 8,
        ..LoaderConfig::default()
    };
    let image = ImageLoader::new(config).load_path(&path);

    assert_eq!(image.error_kind(), Some(ErrorKind::ResourceLimit));
    assert_eq!(image.failed_stage(), Some(LoadStage::Resolving));
}

#[test]
fn surface_handle_outlives_image() {
    let dir = TempDir::new().unwrap();
    let image = Image::from_path(write_fixture(&dir, "keep.png", image::ImageFormat::Png));
    let handle = image.surface().unwrap();
    drop(image);

    assert_eq!(Arc::strong_count(&handle), 1);
    assert_eq!(handle.status(), image_surface_loader::SurfaceStatus::Success);
}

#[test]
fn one_loader_serves_many_threads() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| write_fixture(&dir, &format!("t{}.png", i), image::ImageFormat::Png))
        .collect();
    let loader = ImageLoader::new(LoaderConfig::default());

    std::thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|p| {
                let loader = &loader;
                scope.spawn(move || loader.load_path(p))
            })
            .collect();

        for handle in handles {
            let image = handle.join().unwrap();
            assert!(image.success(), "{}", image.error());
        }
    });
}

#[test]
fn report_serializes_observable_state() {
    let dir = TempDir::new().unwrap();
    let image = Image::from_path(write_fixture(&dir, "r.png", image::ImageFormat::Png));
    let json = image.report().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["mime"], "image/png");
    assert_eq!(value["format"], "png");
    assert_eq!(value["width"], 5);
    assert_eq!(value["error"], "");
    assert!(Path::new(value["filepath"].as_str().unwrap()).ends_with("r.png"));
}
