mod color;
mod config;
mod database;
mod error;
mod export;
mod known_blocks;
mod pipeline;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use config::{DecodeErrorPolicy, Settings, UnsupportedPolicy};

#[derive(Parser)]
#[command(name = "texcolors")]
#[command(version = "1.0.0")]
#[command(about = "Average texture colors and export block color tables", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    export: ExportArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Average a single image and print the result
    Inspect {
        /// Path to the image file
        image: PathBuf,
    },
}

/// Overrides for the export run; unset flags fall back to the settings file
#[derive(Args)]
struct ExportArgs {
    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the texture images
    #[arg(long)]
    textures: Option<PathBuf>,

    /// Known-block list, one name per line
    #[arg(long)]
    blocks: Option<PathBuf>,

    /// Output CSV keyed by the known-block list
    #[arg(long)]
    block_colors: Option<PathBuf>,

    /// Output CSV covering every texture
    #[arg(long)]
    texture_colors: Option<PathBuf>,

    /// Texture file name suffix (case-sensitive)
    #[arg(long)]
    extension: Option<String>,

    /// What to do when an image cannot be decoded
    #[arg(long, value_enum)]
    on_decode_error: Option<DecodeErrorPolicy>,

    /// What to do with images that are not RGB, RGBA or LA
    #[arg(long, value_enum)]
    on_unsupported: Option<UnsupportedPolicy>,
}

impl ExportArgs {
    fn apply(self, settings: &mut Settings) {
        if let Some(dir) = self.textures {
            settings.textures_dir = dir;
        }
        if let Some(path) = self.blocks {
            settings.blocks_file = path;
        }
        if let Some(path) = self.block_colors {
            settings.block_colors_file = path;
        }
        if let Some(path) = self.texture_colors {
            settings.texture_colors_file = path;
        }
        if let Some(extension) = self.extension {
            settings.extension = extension;
        }
        if let Some(policy) = self.on_decode_error {
            settings.on_decode_error = policy;
        }
        if let Some(policy) = self.on_unsupported {
            settings.on_unsupported = policy;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // If RUST_LOG is set, use it; otherwise use cli.verbose flag
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        env_logger::Builder::new()
            .filter_level(if cli.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            })
            .init();
    }

    match cli.command {
        Some(Commands::Inspect { image }) => inspect_texture(image),
        None => export_colors(cli.export),
    }
}

/// Full run: known blocks + texture directory -> two CSV tables
fn export_colors(args: ExportArgs) -> Result<()> {
    let mut settings = Settings::resolve(args.config.as_deref())?;
    args.apply(&mut settings);

    info!("=== Texture Color Export ===");
    info!("Textures: {:?} (*{})", settings.textures_dir, settings.extension);
    info!("Known blocks: {:?}", settings.blocks_file);
    info!("Block colors: {:?}", settings.block_colors_file);
    info!("Texture colors: {:?}", settings.texture_colors_file);

    let summary = pipeline::run(&settings)?;

    info!("\n=== Export Complete ===");
    info!("Block color rows: {}", summary.block_rows);
    info!("Texture color rows: {}", summary.texture_rows);

    Ok(())
}

/// Average one image and report its format and color
fn inspect_texture(path: PathBuf) -> Result<()> {
    info!("Inspecting: {:?}", path);

    let start = std::time::Instant::now();
    let texture = color::decode_texture(&path).with_context(|| format!("failed to decode image {:?}", path))?;
    let image = &texture.image;
    let averaged = texture
        .format
        .and_then(|format| color::average_image(image, format).map(|color| (format, color)));
    let elapsed = start.elapsed();

    info!("Resolution: {}x{}", image.width(), image.height());
    info!("Color type: {:?}", image.color());

    match averaged {
        Some((format, color)) => {
            info!("Pixel format: {}", format);
            info!("Average color: {}", color);
        }
        None => info!("Pixel format not supported (expected RGB, RGBA or LA)"),
    }

    info!("Time: {:.2?}", elapsed);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "texcolors",
            "--textures",
            "assets/block",
            "--on-decode-error",
            "skip",
            "--on-unsupported",
            "zero",
        ])
        .unwrap();
        assert!(cli.command.is_none());

        let mut settings = Settings::default();
        cli.export.apply(&mut settings);
        assert_eq!(settings.textures_dir, PathBuf::from("assets/block"));
        assert_eq!(settings.on_decode_error, DecodeErrorPolicy::Skip);
        assert_eq!(settings.on_unsupported, UnsupportedPolicy::Zero);
        assert_eq!(settings.blocks_file, PathBuf::from("blocks.csv"));
    }

    #[test]
    fn test_inspect_subcommand() {
        let cli = Cli::try_parse_from(["texcolors", "inspect", "stone.png"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Inspect { image }) if image == PathBuf::from("stone.png")));
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = Cli::try_parse_from(["texcolors"]).unwrap();
        let mut settings = Settings::default();
        cli.export.apply(&mut settings);
        assert_eq!(settings, Settings::default());
    }
}
