/// Texture decoding
/// The decoder is picked from the file contents, not the extension. For PNG
/// files the pixel format comes from the header, since the decoder expands
/// tRNS keys and palettes into extra channels.

use image::error::{DecodingError, ImageFormatHint};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, ImageResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::PixelFormat;

/// A decoded texture and the channel layout it is averaged as
#[derive(Debug)]
pub struct DecodedTexture {
    pub image: DynamicImage,
    /// None when the source layout is not one the averager supports
    pub format: Option<PixelFormat>,
}

/// Decode an image file; the file handle is closed before returning
pub fn decode_texture(path: &Path) -> ImageResult<DecodedTexture> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let is_png = reader.format() == Some(ImageFormat::Png);
    let image = reader.decode()?;

    let format = if is_png {
        png_header_format(path)?
    } else {
        PixelFormat::from_color_type(image.color())
    };

    Ok(DecodedTexture { image, format })
}

fn png_header_format(path: &Path) -> ImageResult<Option<PixelFormat>> {
    let file = File::open(path)?;
    let reader = png::Decoder::new(BufReader::new(file))
        .read_info()
        .map_err(|e| ImageError::Decoding(DecodingError::new(ImageFormatHint::Exact(ImageFormat::Png), e)))?;

    Ok(PixelFormat::from_png_color_type(reader.info().color_type))
}
