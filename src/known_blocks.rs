/// Known-block list: the fixed row set and order of the block color table
/// One name per line, surrounding whitespace trimmed. Blank lines are kept
/// as empty names so the output keeps one row per input line. A line ends at
/// `\n`, `\r\n` or a lone `\r`.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::TexColorError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownBlocks {
    names: Vec<String>,
}

impl KnownBlocks {
    /// Load the list from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TexColorError> {
        let path = path.as_ref();
        let read = || -> io::Result<Self> {
            let file = File::open(path)?;
            Self::from_reader(BufReader::new(file))
        };

        read().map_err(|source| TexColorError::KnownBlocks {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let names = text.lines().map(|line| line.trim().to_string()).collect();
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
