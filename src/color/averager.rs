/// Per-texture color averaging
/// The pixel format is resolved once per image, then the raw interleaved
/// samples are summed channel by channel.

use image::DynamicImage;
use std::borrow::Cow;

use super::{Color, PixelFormat};

/// Running per-channel sums over the included pixels
#[derive(Debug, Default)]
struct ChannelSums {
    r: u64,
    g: u64,
    b: u64,
    a: u64,
    count: u64,
}

impl ChannelSums {
    fn add(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.r += u64::from(r);
        self.g += u64::from(g);
        self.b += u64::from(b);
        self.a += u64::from(a);
        self.count += 1;
    }

    /// Floor of the mean; sums are non-negative so integer division truncates
    fn mean(&self, total: u64) -> u8 {
        (total / self.count) as u8
    }

    fn finish(&self, format: PixelFormat) -> Color {
        if self.count == 0 {
            return Color::TRANSPARENT;
        }

        let alpha = match format {
            PixelFormat::Rgb => u8::MAX,
            PixelFormat::Rgba | PixelFormat::LumaAlpha => self.mean(self.a),
        };

        Color::new(self.mean(self.r), self.mean(self.g), self.mean(self.b), alpha)
    }
}

/// Average interleaved 8-bit samples laid out as `format`
/// Trailing samples that do not form a whole pixel are ignored.
pub fn average_pixels(format: PixelFormat, samples: &[u8]) -> Color {
    let mut sums = ChannelSums::default();
    let pixels = samples.chunks_exact(format.channels());

    match format {
        PixelFormat::Rgb => {
            for px in pixels {
                sums.add(px[0], px[1], px[2], u8::MAX);
            }
        }
        PixelFormat::Rgba => {
            // Fully transparent pixels are left out of every channel
            for px in pixels.filter(|px| px[3] > 0) {
                sums.add(px[0], px[1], px[2], px[3]);
            }
        }
        PixelFormat::LumaAlpha => {
            for px in pixels {
                sums.add(px[0], px[0], px[0], px[1]);
            }
        }
    }

    sums.finish(format)
}

fn high_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().map(|&v| (v >> 8) as u8).collect()
}

/// Decoded samples reduced to 8 bits; 16-bit samples keep their high byte
fn samples_u8(image: &DynamicImage) -> Option<Cow<'_, [u8]>> {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => Some(Cow::Borrowed(image.as_bytes())),
        DynamicImage::ImageLuma16(buf) => Some(Cow::Owned(high_bytes(buf.as_raw()))),
        DynamicImage::ImageLumaA16(buf) => Some(Cow::Owned(high_bytes(buf.as_raw()))),
        DynamicImage::ImageRgb16(buf) => Some(Cow::Owned(high_bytes(buf.as_raw()))),
        DynamicImage::ImageRgba16(buf) => Some(Cow::Owned(high_bytes(buf.as_raw()))),
        _ => None,
    }
}

/// Average a decoded image as `format`
/// An RGB source the decoder expanded to four channels (PNG tRNS) is averaged
/// on its color channels only. Returns None when the decoded layout cannot
/// be read as `format`.
pub fn average_image(image: &DynamicImage, format: PixelFormat) -> Option<Color> {
    let samples = samples_u8(image)?;
    let decoded = usize::from(image.color().channel_count());

    if decoded == format.channels() {
        return Some(average_pixels(format, &samples));
    }

    match (format, decoded) {
        (PixelFormat::Rgb, 4) => {
            let rgb: Vec<u8> = samples
                .chunks_exact(4)
                .flat_map(|px| px[..3].iter().copied())
                .collect();
            Some(average_pixels(PixelFormat::Rgb, &rgb))
        }
        _ => None,
    }
}
