use std::path::PathBuf;

use crate::color::{Color, PixelFormat};

/// A single texture file found by the scanner
#[derive(Debug, Clone)]
pub struct TextureRecord {
    /// Texture name (file name without the extension, e.g. "oak_planks")
    pub name: String,

    /// Path to the image file
    pub path: PathBuf,

    /// File size in bytes
    pub file_size: u64,

    /// Width in pixels (set once decoded)
    pub width: Option<u32>,

    /// Height in pixels (set once decoded)
    pub height: Option<u32>,

    /// Channel layout, None if not decoded yet or unsupported
    pub format: Option<PixelFormat>,

    /// Average color, None if not averaged (or skipped)
    pub color: Option<Color>,

    /// Why the texture was left out of the color mapping
    pub skip_reason: Option<String>,
}

impl TextureRecord {
    pub fn from_file(name: String, path: PathBuf, file_size: u64) -> Self {
        Self {
            name,
            path,
            file_size,
            width: None,
            height: None,
            format: None,
            color: None,
            skip_reason: None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }

    /// Get resolution as string (e.g., "16x16")
    pub fn resolution_string(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{}x{}", w, h)),
            _ => None,
        }
    }
}
