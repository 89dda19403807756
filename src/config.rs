/// Run settings: input/output paths and failure policies
/// Loaded from an optional JSON file, then overridden by CLI flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TexColorError;

/// What to do with a file the image decoder rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrorPolicy {
    /// Stop the run with an error
    #[default]
    Abort,
    /// Log a warning and leave the texture out
    Skip,
}

/// What to do with an image whose channel layout is not RGB, RGBA or LA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Log a warning and leave the texture out
    #[default]
    Skip,
    /// Record the texture as fully transparent (0,0,0,0)
    Zero,
    /// Stop the run with an error
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the texture images
    pub textures_dir: PathBuf,
    /// Known-block list, one name per line
    pub blocks_file: PathBuf,
    /// Output table keyed by the known-block list
    pub block_colors_file: PathBuf,
    /// Output table covering every texture
    pub texture_colors_file: PathBuf,
    /// File name suffix of texture images (case-sensitive)
    pub extension: String,
    pub on_decode_error: DecodeErrorPolicy,
    pub on_unsupported: UnsupportedPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            textures_dir: PathBuf::from("textures/block"),
            blocks_file: PathBuf::from("blocks.csv"),
            block_colors_file: PathBuf::from("blockcolors.csv"),
            texture_colors_file: PathBuf::from("texturecolors.csv"),
            extension: ".png".to_string(),
            on_decode_error: DecodeErrorPolicy::default(),
            on_unsupported: UnsupportedPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; absent keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TexColorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TexColorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| TexColorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicitly named file, else the user config file if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, TexColorError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::config_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using settings from {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Default settings location (e.g. ~/.config/texcolors/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("texcolors").join("settings.json"))
    }
}
