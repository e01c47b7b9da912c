// converter.rs
pub mod error;
pub mod format;


use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, ImageOutputFormat};
use tracing::{debug, info, instrument};

use crate::utils::measure_time;

pub use error::{ConvertError, Result};
pub use format::TargetFormat;

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub jpeg_quality: u8,
    pub webp_quality: f32,
    pub webp_lossless: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            webp_quality: 80.0,
            webp_lossless: false,
        }
    }
}

impl ConvertOptions {
    pub fn builder() -> ConvertOptionsBuilder {
        ConvertOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ConvertOptionsBuilder {
    options: ConvertOptions,
}

impl ConvertOptionsBuilder {
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.options.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn webp_quality(mut self, quality: f32) -> Self {
        self.options.webp_quality = quality.clamp(0.0, 100.0);
        self
    }

    pub fn webp_lossless(mut self, lossless: bool) -> Self {
        self.options.webp_lossless = lossless;
        self
    }

    pub fn build(self) -> ConvertOptions {
        self.options
    }
}

/// One conversion as the user assembled it: nothing here has been validated yet.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: Option<PathBuf>,
    pub format: String,
    pub destination: PathBuf,
}

impl ConversionRequest {
    /// Validates the request, then converts. The source is checked before the
    /// format and both before anything touches the filesystem.
    pub fn run(&self, options: &ConvertOptions) -> Result<PathBuf> {
        let source = self.source.as_deref().ok_or(ConvertError::NoFileSelected)?;
        let format: TargetFormat = self.format.parse()?;
        convert(source, format, &self.destination, options)
    }
}

/// Decodes `source`, re-encodes it as `format` and writes it to `destination`.
///
/// Returns the path actually written, which differs from `destination` only
/// when the latter had no extension. An existing file at that path is replaced.
#[instrument(skip(format, options), fields(target = %format))]
pub fn convert(
    source: &Path,
    format: TargetFormat,
    destination: &Path,
    options: &ConvertOptions,
) -> Result<PathBuf> {
    let destination = resolve_destination(destination, format);

    let (decoded, decode_duration) = measure_time(|| decode(source));
    let image = decoded?;
    debug!(
        "Decoded {}x{} {:?} image in {:?}",
        image.width(),
        image.height(),
        image.color(),
        decode_duration
    );

    let (encoded, encode_duration) = measure_time(|| encode(image, format, options));
    let bytes = encoded?;
    debug!("Encoded {} bytes of {} in {:?}", bytes.len(), format, encode_duration);

    let (written, write_duration) = measure_time(|| write_output(&bytes, &destination, format));
    written?;
    debug!("Wrote {} in {:?}", destination.display(), write_duration);

    info!("Converted {} to {}", source.display(), destination.display());
    Ok(destination)
}

/// Reads an image, sniffing its content first and falling back to the extension.
pub fn decode(source: &Path) -> Result<DynamicImage> {
    ImageReader::open(source)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| ConvertError::decode(source, e))?
        .decode()
        .map_err(|e| ConvertError::decode(source, e))
}

/// JPEG cannot store alpha or palette data, so anything that is not plain
/// 8-bit RGB or grayscale becomes RGB. Other formats are left alone.
pub fn normalize(image: DynamicImage, format: TargetFormat) -> DynamicImage {
    if format != TargetFormat::Jpeg {
        return image;
    }
    match image.color() {
        ColorType::Rgb8 | ColorType::L8 => image,
        ColorType::L16 => {
            debug!("Narrowing 16-bit grayscale to 8 bits for JPEG");
            DynamicImage::ImageLuma8(image.into_luma8())
        }
        other => {
            debug!("Converting {:?} to RGB for JPEG", other);
            DynamicImage::ImageRgb8(image.into_rgb8())
        }
    }
}

fn codec_layouts(format: TargetFormat) -> &'static [ColorType] {
    match format {
        TargetFormat::Jpeg => &[ColorType::L8, ColorType::Rgb8],
        TargetFormat::Png => &[
            ColorType::L8,
            ColorType::La8,
            ColorType::Rgb8,
            ColorType::Rgba8,
            ColorType::L16,
            ColorType::La16,
            ColorType::Rgb16,
            ColorType::Rgba16,
        ],
        TargetFormat::Bmp | TargetFormat::Tiff => {
            &[ColorType::L8, ColorType::Rgb8, ColorType::Rgba8]
        }
        TargetFormat::Gif | TargetFormat::WebP => &[ColorType::Rgb8, ColorType::Rgba8],
    }
}

/// Moves the image to the closest 8-bit layout the codec accepts, keeping
/// alpha whenever the codec can store it.
fn adapt_for_codec(image: DynamicImage, format: TargetFormat) -> DynamicImage {
    let color = image.color();
    let layouts = codec_layouts(format);
    if layouts.contains(&color) {
        return image;
    }

    debug!("Adapting {:?} for the {} codec", color, format);
    if color.has_alpha() && format.supports_alpha() {
        DynamicImage::ImageRgba8(image.into_rgba8())
    } else if !color.has_color() && !color.has_alpha() && layouts.contains(&ColorType::L8) {
        DynamicImage::ImageLuma8(image.into_luma8())
    } else {
        DynamicImage::ImageRgb8(image.into_rgb8())
    }
}

/// Encodes into memory so that nothing reaches disk unless encoding succeeded.
pub fn encode(image: DynamicImage, format: TargetFormat, options: &ConvertOptions) -> Result<Vec<u8>> {
    let image = adapt_for_codec(normalize(image, format), format);

    let output_format = match format {
        TargetFormat::WebP => return encode_webp(&image, options),
        TargetFormat::Jpeg => ImageOutputFormat::Jpeg(options.jpeg_quality),
        TargetFormat::Png => ImageOutputFormat::Png,
        TargetFormat::Bmp => ImageOutputFormat::Bmp,
        TargetFormat::Gif => ImageOutputFormat::Gif,
        TargetFormat::Tiff => ImageOutputFormat::Tiff,
    };

    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, output_format)
        .map_err(|e| ConvertError::encode(format, e))?;
    Ok(cursor.into_inner())
}

fn encode_webp(image: &DynamicImage, options: &ConvertOptions) -> Result<Vec<u8>> {
    let encoder = webp::Encoder::from_image(image)
        .map_err(|e| ConvertError::encode(TargetFormat::WebP, e))?;
    let webp = if options.webp_lossless {
        encoder.encode_lossless()
    } else {
        encoder.encode(options.webp_quality)
    };
    Ok(webp.to_vec())
}

/// Appends the format's extension when the caller left it out.
pub fn resolve_destination(destination: &Path, format: TargetFormat) -> PathBuf {
    match destination.extension() {
        Some(_) => destination.to_path_buf(),
        None => destination.with_extension(format.extension()),
    }
}

/// Writes through a temporary sibling file that replaces `destination` only
/// once every byte is on disk.
fn write_output(bytes: &[u8], destination: &Path, format: TargetFormat) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".converting-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    let mut staged = builder
        .tempfile_in(dir)
        .map_err(|e| ConvertError::write(format, destination, e))?;
    staged
        .write_all(bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| ConvertError::write(format, destination, e))?;
    staged
        .persist(destination)
        .map_err(|e| ConvertError::write(format, destination, e.error))?;
    Ok(())
}
