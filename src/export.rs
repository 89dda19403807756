/// CSV export of the color mapping
/// Rows are `name,r,g,b,a` with no header row, each ended by CRLF.

use log::{error, info};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::database::ColorMap;
use crate::error::TexColorError;
use crate::known_blocks::KnownBlocks;

pub const BLOCK_TABLE: &str = "block colors";
pub const TEXTURE_TABLE: &str = "texture colors";

/// Row counts of a successful export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub block_rows: usize,
    pub texture_rows: usize,
}

fn table_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer)
}

/// One row per known block, in list order
/// Blocks without a texture get four empty color fields.
pub fn write_block_colors<W: io::Write>(
    writer: W,
    blocks: &KnownBlocks,
    colors: &ColorMap,
) -> csv::Result<usize> {
    let mut wtr = table_writer(writer);
    let mut rows = 0;

    for name in blocks.iter() {
        match colors.get(name) {
            Some(color) => {
                let [r, g, b, a] = color.fields();
                wtr.write_record([name, r.as_str(), g.as_str(), b.as_str(), a.as_str()])?;
            }
            None => wtr.write_record([name, "", "", "", ""])?,
        }
        rows += 1;
    }

    wtr.flush()?;
    Ok(rows)
}

/// One row per averaged texture, in mapping order
pub fn write_texture_colors<W: io::Write>(writer: W, colors: &ColorMap) -> csv::Result<usize> {
    let mut wtr = table_writer(writer);
    let mut rows = 0;

    for (name, color) in colors.iter() {
        let [r, g, b, a] = color.fields();
        wtr.write_record([name, r.as_str(), g.as_str(), b.as_str(), a.as_str()])?;
        rows += 1;
    }

    wtr.flush()?;
    Ok(rows)
}

fn write_table_file(
    path: &Path,
    table: &'static str,
    write: impl FnOnce(File) -> csv::Result<usize>,
) -> Result<usize, TexColorError> {
    let to_error = |source: csv::Error| TexColorError::Write {
        table,
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| to_error(e.into()))?;
    let rows = write(file).map_err(to_error)?;

    info!("Wrote {} rows of {} to {:?}", rows, table, path);
    Ok(rows)
}

/// Write both tables
/// The two writes are independent: a failure in one does not prevent the
/// other from being attempted. Any failure fails the export afterwards.
pub fn export_tables(
    block_colors_path: &Path,
    texture_colors_path: &Path,
    blocks: &KnownBlocks,
    colors: &ColorMap,
) -> Result<ExportSummary, TexColorError> {
    let block_rows = write_table_file(block_colors_path, BLOCK_TABLE, |file| {
        write_block_colors(file, blocks, colors)
    });
    let texture_rows = write_table_file(texture_colors_path, TEXTURE_TABLE, |file| {
        write_texture_colors(file, colors)
    });

    match (block_rows, texture_rows) {
        (Ok(block_rows), Ok(texture_rows)) => Ok(ExportSummary {
            block_rows,
            texture_rows,
        }),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(a), Err(b)) => {
            for failure in [&a, &b] {
                match std::error::Error::source(failure) {
                    Some(source) => error!("{}: {}", failure, source),
                    None => error!("{}", failure),
                }
            }
            Err(TexColorError::Export(vec![a, b]))
        }
    }
}
