pub mod averager;
pub mod source;

pub use averager::average_image;
pub use source::decode_texture;

use std::fmt;

/// Mean RGBA color of a texture's visible pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Color of a texture with no visible pixels
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channel values as decimal text, in r, g, b, a order
    pub fn fields(&self) -> [String; 4] {
        [
            self.r.to_string(),
            self.g.to_string(),
            self.b.to_string(),
            self.a.to_string(),
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Channel layouts the averager understands
/// 16-bit sources are read through the high byte of each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// R, G, B with implicit full opacity
    Rgb,
    /// R, G, B, A; only pixels with alpha > 0 count
    Rgba,
    /// Luminance + alpha; every pixel counts
    LumaAlpha,
}

impl PixelFormat {
    /// Layout of a decoded image, for sources without a PNG header
    pub fn from_color_type(color_type: image::ColorType) -> Option<Self> {
        match color_type {
            image::ColorType::Rgb8 | image::ColorType::Rgb16 => Some(PixelFormat::Rgb),
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => Some(PixelFormat::Rgba),
            image::ColorType::La8 | image::ColorType::La16 => Some(PixelFormat::LumaAlpha),
            _ => None,
        }
    }

    /// Layout declared in a PNG header, before tRNS or palette expansion
    /// Grayscale and indexed images are not averaged.
    pub fn from_png_color_type(color_type: png::ColorType) -> Option<Self> {
        match color_type {
            png::ColorType::Rgb => Some(PixelFormat::Rgb),
            png::ColorType::Rgba => Some(PixelFormat::Rgba),
            png::ColorType::GrayscaleAlpha => Some(PixelFormat::LumaAlpha),
            _ => None,
        }
    }

    /// Interleaved samples per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
            PixelFormat::LumaAlpha => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PixelFormat::Rgb => "RGB",
            PixelFormat::Rgba => "RGBA",
            PixelFormat::LumaAlpha => "LA",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
