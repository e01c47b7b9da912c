use std::fmt;
use std::str::FromStr;

use super::error::ConvertError;

/// The fixed set of formats a picture can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
    Tiff,
    WebP,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 6] = [
        TargetFormat::Jpeg,
        TargetFormat::Png,
        TargetFormat::Bmp,
        TargetFormat::Gif,
        TargetFormat::Tiff,
        TargetFormat::WebP,
    ];

    /// Names offered in the format dropdown, first one is the default selection.
    pub fn choices() -> [&'static str; 6] {
        ["jpg", "png", "bmp", "gif", "tiff", "webp"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "JPEG",
            TargetFormat::Png => "PNG",
            TargetFormat::Bmp => "BMP",
            TargetFormat::Gif => "GIF",
            TargetFormat::Tiff => "TIFF",
            TargetFormat::WebP => "WEBP",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Gif => "gif",
            TargetFormat::Tiff => "tiff",
            TargetFormat::WebP => "webp",
        }
    }

    /// Whether the codec can store an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, TargetFormat::Jpeg)
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            "bmp" => Ok(TargetFormat::Bmp),
            "gif" => Ok(TargetFormat::Gif),
            "tiff" => Ok(TargetFormat::Tiff),
            "webp" => Ok(TargetFormat::WebP),
            _ => Err(ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
