/// Error types shared across the scan, average and export stages

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TexColorError {
    #[error("failed to read texture directory {path:?}")]
    ScanDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read known-block list {path:?}")]
    KnownBlocks {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported pixel format {color_type:?} in {path:?}")]
    UnsupportedFormat {
        path: PathBuf,
        color_type: image::ColorType,
    },

    #[error("failed to write {table} to {path:?}")]
    Write {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} of 2 output tables failed to write", .0.len())]
    Export(Vec<TexColorError>),

    #[error("failed to read settings file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
