use super::{ColorMap, TextureRecord};
use crate::color::{self, Color};
use crate::config::{DecodeErrorPolicy, UnsupportedPolicy};
use crate::error::TexColorError;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Service for discovering texture files and averaging their colors
pub struct TextureDiscoveryService;

impl TextureDiscoveryService {
    /// List the texture files directly inside `dir`
    /// Only names ending in `extension` (exact, case-sensitive) are kept.
    /// Records come back sorted by file name; the texture name is the file
    /// name with the extension removed.
    pub fn scan(dir: &Path, extension: &str) -> Result<Vec<TextureRecord>, TexColorError> {
        let scan_error = |source: io::Error| TexColorError::ScanDirectory {
            path: dir.to_path_buf(),
            source,
        };

        let meta = std::fs::metadata(dir).map_err(scan_error)?;
        if !meta.is_dir() {
            return Err(scan_error(io::Error::new(
                io::ErrorKind::Other,
                "not a directory",
            )));
        }

        info!("Scanning {:?} for *{} textures...", dir, extension);
        let start_time = std::time::Instant::now();

        let mut records = Vec::new();
        let mut ignored = 0;

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| scan_error(e.into()))?;

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                debug!("Skipping non UTF-8 file name: {:?}", entry.file_name());
                continue;
            };

            let Some(name) = file_name.strip_suffix(extension) else {
                ignored += 1;
                continue;
            };

            let file_size = entry.metadata().map_err(|e| scan_error(e.into()))?.len();

            records.push(TextureRecord::from_file(
                name.to_string(),
                entry.path().to_path_buf(),
                file_size,
            ));
        }

        let elapsed = start_time.elapsed();
        info!(
            "Found {} textures ({} other files ignored) in {:.2?}",
            records.len(),
            ignored,
            elapsed
        );

        Ok(records)
    }

    /// Decode and average every record, in order
    /// Each image is opened, decoded and dropped before the next one.
    /// Skipped records keep a `skip_reason` and stay out of the returned map.
    pub fn compute_colors(
        records: &mut [TextureRecord],
        on_decode_error: DecodeErrorPolicy,
        on_unsupported: UnsupportedPolicy,
    ) -> Result<ColorMap, TexColorError> {
        info!("Averaging colors for {} textures...", records.len());
        let start_time = std::time::Instant::now();

        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        let mut colors = ColorMap::new();

        for record in records.iter_mut() {
            pb.set_message(record.name.clone());
            record.format = None;
            record.color = None;
            record.skip_reason = None;
            record.width = None;
            record.height = None;

            let texture = match color::decode_texture(&record.path) {
                Ok(texture) => texture,
                Err(source) => match on_decode_error {
                    DecodeErrorPolicy::Abort => {
                        pb.abandon();
                        return Err(TexColorError::Decode {
                            path: record.path.clone(),
                            source,
                        });
                    }
                    DecodeErrorPolicy::Skip => {
                        pb.suspend(|| warn!("Skipping {}: failed to decode: {}", record.name, source));
                        record.skip_reason = Some(format!("decode error: {}", source));
                        pb.inc(1);
                        continue;
                    }
                },
            };

            let image = &texture.image;
            record.width = Some(image.width());
            record.height = Some(image.height());

            let averaged = texture
                .format
                .and_then(|format| color::average_image(image, format).map(|color| (format, color)));

            let color = match averaged {
                Some((format, color)) => {
                    record.format = Some(format);
                    color
                }
                None => {
                    let color_type = image.color();
                    match on_unsupported {
                        UnsupportedPolicy::Abort => {
                            pb.abandon();
                            return Err(TexColorError::UnsupportedFormat {
                                path: record.path.clone(),
                                color_type,
                            });
                        }
                        UnsupportedPolicy::Skip => {
                            pb.suspend(|| {
                                warn!("Skipping {}: unsupported pixel format {:?}", record.name, color_type)
                            });
                            record.skip_reason = Some(format!("unsupported format {:?}", color_type));
                            pb.inc(1);
                            continue;
                        }
                        UnsupportedPolicy::Zero => {
                            debug!("{}: unsupported pixel format {:?}, recording as transparent", record.name, color_type);
                            Color::TRANSPARENT
                        }
                    }
                }
            };

            debug!("{} ({} bytes) -> {}", record.name, record.file_size, color);
            record.color = Some(color);
            colors.insert(record.name.clone(), color);
            pb.inc(1);
        }

        pb.finish_with_message(format!("{} textures averaged", colors.len()));

        let elapsed = start_time.elapsed();
        info!(
            "Averaged {} textures ({} skipped) in {:.2?}",
            colors.len(),
            records.len() - colors.len(),
            elapsed
        );

        Ok(colors)
    }

    /// Get statistics about scanned and averaged textures
    pub fn get_statistics(records: &[TextureRecord]) -> TextureStats {
        let mut stats = TextureStats::default();

        stats.total = records.len();

        for record in records {
            if record.is_skipped() {
                stats.skipped += 1;
                continue;
            }

            if let Some(color) = record.color {
                stats.averaged += 1;
                if color == Color::TRANSPARENT {
                    stats.transparent += 1;
                }
            }

            let format = record
                .format
                .map(|f| f.display_name().to_string())
                .unwrap_or_else(|| "unsupported".to_string());
            *stats.by_format.entry(format).or_insert(0) += 1;

            if let Some(res) = record.resolution_string() {
                *stats.by_resolution.entry(res).or_insert(0) += 1;
            }
        }

        stats
    }
}

#[derive(Debug, Default)]
pub struct TextureStats {
    pub total: usize,
    pub averaged: usize,
    pub skipped: usize,
    pub transparent: usize,
    pub by_format: HashMap<String, usize>,
    pub by_resolution: HashMap<String, usize>,
}

impl std::fmt::Display for TextureStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Texture Color Statistics ===")?;
        writeln!(f, "Total textures: {}", self.total)?;
        writeln!(f, "  Averaged: {}", self.averaged)?;
        writeln!(f, "  Skipped: {}", self.skipped)?;
        writeln!(f, "  Fully transparent: {}", self.transparent)?;

        if !self.by_format.is_empty() {
            writeln!(f, "\nBy pixel format:")?;
            let mut formats: Vec<_> = self.by_format.iter().collect();
            formats.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            for (format, count) in formats {
                writeln!(f, "  {}: {}", format, count)?;
            }
        }

        if !self.by_resolution.is_empty() {
            writeln!(f, "\nTop 10 resolutions:")?;
            let mut resolutions: Vec<_> = self.by_resolution.iter().collect();
            resolutions.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            for (res, count) in resolutions.iter().take(10) {
                writeln!(f, "  {}: {}", res, count)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelFormat;
    use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;

    fn write_rgb(dir: &Path, file: &str, rgb: [u8; 3]) {
        RgbImage::from_pixel(4, 4, Rgb(rgb)).save(dir.join(file)).unwrap();
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_rgb(dir.path(), "stone.png", [1, 1, 1]);
        write_rgb(dir.path(), "acacia_log.png", [2, 2, 2]);
        write_rgb(dir.path(), "dirt.png", [3, 3, 3]);
        fs::write(dir.path().join("stone.png.mcmeta"), "{}").unwrap();
        fs::write(dir.path().join("README.txt"), "hi").unwrap();
        fs::write(dir.path().join("UPPER.PNG"), "not matched").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["acacia_log", "dirt", "stone"]);
        assert!(records.iter().all(|r| r.file_size > 0));
    }

    #[test]
    fn test_scan_orders_by_file_name() {
        // "a.b.png" sorts before "a.png" by file name even though "a" < "a.b"
        let dir = tempfile::tempdir().unwrap();
        write_rgb(dir.path(), "a.png", [1, 1, 1]);
        write_rgb(dir.path(), "a.b.png", [1, 1, 1]);

        let records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a.b", "a"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = TextureDiscoveryService::scan(&dir.path().join("missing"), ".png");
        assert!(matches!(result, Err(TexColorError::ScanDirectory { .. })));
    }

    #[test]
    fn test_compute_colors() {
        let dir = tempfile::tempdir().unwrap();
        write_rgb(dir.path(), "dirt.png", [10, 20, 30]);
        RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 0]))
            .save(dir.path().join("glass.png"))
            .unwrap();

        let mut records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let colors = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Abort,
            UnsupportedPolicy::Skip,
        )
        .unwrap();

        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get("dirt"), Some(Color::new(10, 20, 30, 255)));
        assert_eq!(colors.get("glass"), Some(Color::TRANSPARENT));
        assert_eq!(records[0].format, Some(PixelFormat::Rgb));
        assert_eq!(records[0].resolution_string(), Some("4x4".to_string()));

        let stats = TextureDiscoveryService::get_statistics(&records);
        assert_eq!(stats.averaged, 2);
        assert_eq!(stats.transparent, 1);
        assert_eq!(stats.by_format.get("RGBA"), Some(&1));
    }

    #[test]
    fn test_decode_error_policies() {
        let dir = tempfile::tempdir().unwrap();
        write_rgb(dir.path(), "dirt.png", [10, 20, 30]);
        fs::write(dir.path().join("broken.png"), b"definitely not a png").unwrap();

        let mut records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let result = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Abort,
            UnsupportedPolicy::Skip,
        );
        assert!(matches!(result, Err(TexColorError::Decode { .. })));

        let mut records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let colors = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Skip,
            UnsupportedPolicy::Skip,
        )
        .unwrap();
        assert_eq!(colors.len(), 1);
        assert!(!colors.contains("broken"));
        assert!(records[0].is_skipped());

        let stats = TextureDiscoveryService::get_statistics(&records);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_unsupported_format_policies() {
        let dir = tempfile::tempdir().unwrap();
        GrayImage::from_pixel(2, 2, image::Luma([77]))
            .save(dir.path().join("gray.png"))
            .unwrap();

        let mut records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let colors = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Abort,
            UnsupportedPolicy::Skip,
        )
        .unwrap();
        assert!(colors.is_empty());

        let colors = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Abort,
            UnsupportedPolicy::Zero,
        )
        .unwrap();
        assert_eq!(colors.get("gray"), Some(Color::TRANSPARENT));

        let result = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Abort,
            UnsupportedPolicy::Abort,
        );
        assert!(matches!(result, Err(TexColorError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_rerun_clears_stale_resolution() {
        let dir = tempfile::tempdir().unwrap();
        write_rgb(dir.path(), "dirt.png", [10, 20, 30]);

        let mut records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        TextureDiscoveryService::compute_colors(&mut records, DecodeErrorPolicy::Abort, UnsupportedPolicy::Skip)
            .unwrap();
        assert_eq!(records[0].resolution_string(), Some("4x4".to_string()));

        fs::write(dir.path().join("dirt.png"), b"truncated").unwrap();
        let colors =
            TextureDiscoveryService::compute_colors(&mut records, DecodeErrorPolicy::Skip, UnsupportedPolicy::Skip)
                .unwrap();

        assert!(colors.is_empty());
        assert!(records[0].is_skipped());
        assert_eq!(records[0].resolution_string(), None);
        assert_eq!(records[0].format, None);
        assert_eq!(records[0].color, None);
    }

    #[test]
    fn test_sixteen_bit_texture() {
        let dir = tempfile::tempdir().unwrap();
        let img: image::ImageBuffer<Rgb<u16>, Vec<u16>> =
            image::ImageBuffer::from_pixel(2, 2, Rgb([0x0A00, 0x1400, 0x1E00]));
        img.save(dir.path().join("deep.png")).unwrap();

        let mut records = TextureDiscoveryService::scan(dir.path(), ".png").unwrap();
        let colors = TextureDiscoveryService::compute_colors(
            &mut records,
            DecodeErrorPolicy::Abort,
            UnsupportedPolicy::Abort,
        )
        .unwrap();

        assert_eq!(colors.get("deep"), Some(Color::new(10, 20, 30, 255)));
        assert_eq!(records[0].format, Some(PixelFormat::Rgb));
    }
}
