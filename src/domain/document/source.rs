// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/source.rs
//
// Source image: decoding raster and vector inputs into pixels.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};
use image::{ImageReader, RgbaImage};
use resvg::tiny_skia::{Pixmap, PixmapRef};

use super::convert::rgba_to_pixmap;
use crate::error::{CropError, CropResult};

/// Where the image bytes come from.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    /// `data:<mime>;base64,<payload>` as produced by a file reader.
    DataUri(String),
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "ImageSource::Path({})", path.display()),
            Self::Bytes(bytes) => write!(f, "ImageSource::Bytes({} bytes)", bytes.len()),
            Self::DataUri(uri) => write!(f, "ImageSource::DataUri({} chars)", uri.len()),
        }
    }
}

impl ImageSource {
    /// Interpret a command line argument: data URIs verbatim, anything else as a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("data:") {
            Self::DataUri(arg.to_string())
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

/// Supported source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Raster,
    Vector,
}

impl SourceKind {
    /// Detect kind from file extension. Unknown extensions fall back to raster
    /// and are left to the decoder.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("svg" | "svgz") => Self::Vector,
            _ => Self::Raster,
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        if mime.eq_ignore_ascii_case("image/svg+xml") {
            Self::Vector
        } else {
            Self::Raster
        }
    }

    /// Guess from content: anything the raster decoder does not recognise
    /// and that looks like markup is treated as SVG.
    pub fn sniff(bytes: &[u8]) -> Self {
        if image::guess_format(bytes).is_ok() {
            return Self::Raster;
        }
        let head = bytes.trim_ascii_start();
        if head.starts_with(b"<") {
            Self::Vector
        } else {
            Self::Raster
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "Raster"),
            Self::Vector => write!(f, "Vector"),
        }
    }
}

/// Decoded source image, immutable for the lifetime of an engine.
pub struct SourceImage {
    kind: SourceKind,
    pixels: RgbaImage,
    pixmap: Pixmap,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SourceImage::{}({}x{})",
            self.kind,
            self.pixels.width(),
            self.pixels.height()
        )
    }
}

impl SourceImage {
    /// Wrap already decoded pixels.
    pub fn from_rgba(pixels: RgbaImage) -> CropResult<Self> {
        Self::with_kind(SourceKind::Raster, pixels)
    }

    fn with_kind(kind: SourceKind, pixels: RgbaImage) -> CropResult<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(CropError::InvalidImageDimensions { width, height });
        }

        let pixmap = rgba_to_pixmap(&pixels)
            .ok_or(CropError::InvalidImageDimensions { width, height })?;

        Ok(Self {
            kind,
            pixels,
            pixmap,
        })
    }

    /// Decode a source on the current thread.
    pub fn open(source: &ImageSource) -> CropResult<Self> {
        let (kind, pixels) = match source {
            ImageSource::Path(path) => decode_path(path)?,
            ImageSource::Bytes(bytes) => {
                let kind = SourceKind::sniff(bytes);
                (kind, decode_bytes(bytes, kind)?)
            }
            ImageSource::DataUri(uri) => {
                let (mime, bytes) = parse_data_uri(uri)?;
                let kind = SourceKind::from_mime(&mime);
                (kind, decode_bytes(&bytes, kind)?)
            }
        };

        let image = Self::with_kind(kind, pixels)?;
        log::debug!("Loaded {:?} from {:?}", image, source);
        Ok(image)
    }

    /// Decode a source on the blocking pool.
    ///
    /// The engine can only be built from a loaded image, so a failure here
    /// is the caller's cue to report it and ask for another source.
    pub async fn load(source: ImageSource) -> CropResult<Self> {
        let result = tokio::task::spawn_blocking(move || Self::open(&source))
            .await
            .map_err(|e| CropError::ImageLoadFailed(e.to_string()))?;

        if let Err(e) = &result {
            log::error!("Image load failed: {e}");
        }
        result
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Natural pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixmap(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

fn decode_path(path: &Path) -> CropResult<(SourceKind, RgbaImage)> {
    match SourceKind::from_path(path) {
        SourceKind::Vector => {
            let bytes = std::fs::read(path).map_err(|e| {
                CropError::ImageLoadFailed(format!("{}: {e}", path.display()))
            })?;
            Ok((SourceKind::Vector, decode_bytes(&bytes, SourceKind::Vector)?))
        }
        SourceKind::Raster => {
            let document = ImageReader::open(path)
                .map_err(|e| CropError::ImageLoadFailed(format!("{}: {e}", path.display())))?
                .with_guessed_format()
                .map_err(|e| CropError::ImageLoadFailed(format!("{}: {e}", path.display())))?
                .decode()?;
            Ok((SourceKind::Raster, document.to_rgba8()))
        }
    }
}

fn decode_bytes(bytes: &[u8], kind: SourceKind) -> CropResult<RgbaImage> {
    match kind {
        SourceKind::Raster => Ok(image::load_from_memory(bytes)?.to_rgba8()),
        SourceKind::Vector => rasterize_svg(bytes),
    }
}

#[cfg(feature = "vector")]
fn rasterize_svg(bytes: &[u8]) -> CropResult<RgbaImage> {
    use resvg::tiny_skia::Transform;
    use resvg::usvg::{Options, Tree};

    use super::convert::pixmap_to_rgba;
    use crate::constant::MIN_PIXMAP_SIZE;

    let options = Options::default();
    let tree =
        Tree::from_data(bytes, &options).map_err(|e| CropError::ImageLoadFailed(e.to_string()))?;

    // Natural size from the viewBox / width and height attributes.
    let size = tree.size();
    let width = (size.width().ceil() as u32).max(MIN_PIXMAP_SIZE);
    let height = (size.height().ceil() as u32).max(MIN_PIXMAP_SIZE);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| CropError::ImageLoadFailed("Failed to create pixmap".to_string()))?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba(&pixmap))
}

#[cfg(not(feature = "vector"))]
fn rasterize_svg(_bytes: &[u8]) -> CropResult<RgbaImage> {
    Err(CropError::ImageLoadFailed(
        "SVG support is disabled (enable the `vector` feature)".to_string(),
    ))
}

/// Split a base64 data URI into its MIME type and decoded payload.
fn parse_data_uri(uri: &str) -> CropResult<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| CropError::ImageLoadFailed("not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CropError::ImageLoadFailed("data URI has no payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| CropError::ImageLoadFailed("only base64 data URIs are supported".to_string()))?;

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CropError::ImageLoadFailed(e.to_string()))?;

    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([12, 34, 56, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn kind_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("a/b.SVG")), SourceKind::Vector);
        assert_eq!(SourceKind::from_path(Path::new("a/b.png")), SourceKind::Raster);
        assert_eq!(SourceKind::from_path(Path::new("noext")), SourceKind::Raster);
    }

    #[test]
    fn sniff_detects_markup() {
        assert_eq!(SourceKind::sniff(b"  <svg></svg>"), SourceKind::Vector);
        assert_eq!(SourceKind::sniff(&png_bytes(1, 1)), SourceKind::Raster);
    }

    #[test]
    fn decodes_png_bytes() {
        let image = SourceImage::open(&ImageSource::Bytes(png_bytes(7, 5))).unwrap();
        assert_eq!(image.dimensions(), (7, 5));
        assert_eq!(image.kind(), SourceKind::Raster);
        assert_eq!(image.pixels().get_pixel(3, 3), &Rgba([12, 34, 56, 255]));
    }

    #[test]
    fn decodes_data_uri() {
        let uri = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png_bytes(4, 9))
        );
        let image = SourceImage::open(&ImageSource::from_arg(&uri)).unwrap();
        assert_eq!(image.dimensions(), (4, 9));
    }

    #[test]
    fn rejects_non_base64_data_uri() {
        let err = SourceImage::open(&ImageSource::DataUri("data:image/png,abc".into())).unwrap_err();
        assert!(matches!(err, CropError::ImageLoadFailed(_)));
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let err = SourceImage::open(&ImageSource::Bytes(vec![1, 2, 3, 4])).unwrap_err();
        assert!(matches!(err, CropError::ImageLoadFailed(_)));
    }

    #[test]
    fn missing_file_fails_to_load() {
        let err = SourceImage::open(&ImageSource::Path("/nonexistent/cropsquare.png".into()))
            .unwrap_err();
        assert!(matches!(err, CropError::ImageLoadFailed(_)));
    }

    #[test]
    fn empty_pixels_are_invalid() {
        assert_eq!(
            SourceImage::from_rgba(RgbaImage::new(0, 3)).unwrap_err(),
            CropError::InvalidImageDimensions { width: 0, height: 3 }
        );
    }

    #[cfg(feature = "vector")]
    #[test]
    fn rasterizes_svg_at_natural_size() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30">
            <rect width="40" height="30" fill="red"/></svg>"#;
        let image = SourceImage::open(&ImageSource::Bytes(svg.to_vec())).unwrap();
        assert_eq!(image.kind(), SourceKind::Vector);
        assert_eq!(image.dimensions(), (40, 30));
        assert_eq!(image.pixels().get_pixel(20, 15), &Rgba([255, 0, 0, 255]));
    }

    #[tokio::test]
    async fn async_load_reports_failure() {
        let err = SourceImage::load(ImageSource::Bytes(Vec::new())).await.unwrap_err();
        assert!(matches!(err, CropError::ImageLoadFailed(_)));
    }

    #[tokio::test]
    async fn async_load_decodes() {
        let image = SourceImage::load(ImageSource::Bytes(png_bytes(2, 3))).await.unwrap();
        assert_eq!(image.dimensions(), (2, 3));
    }
}
