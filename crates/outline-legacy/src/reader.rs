//! Legacy outline file reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::decoder::{Decoded, Decoder};
use crate::error::{LegacyError, Result};
use crate::options::DecodeOptions;

/// Reads a whole legacy outline from any byte source and decodes it.
pub struct LegacyReader<R: Read> {
    reader: BufReader<R>,
    options: DecodeOptions,
}

impl<R: Read> LegacyReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the source to its end, then decode the buffer in one pass.
    pub fn read_outline(mut self) -> Result<Decoded> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        tracing::debug!(bytes = data.len(), "read legacy outline");
        Ok(Decoder::new(self.options).decode(&data)?)
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LegacyError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LegacyError::Io(e)
        }
    })
}

impl LegacyReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open_file(path)?))
    }

    pub fn open_with_options(path: &Path, options: DecodeOptions) -> Result<Self> {
        Ok(Self::with_options(open_file(path)?, options))
    }
}

/// Read and decode a legacy outline file.
pub fn read_outline(path: &Path) -> Result<Decoded> {
    LegacyReader::open(path)?.read_outline()
}

/// Read and decode a legacy outline file with options.
pub fn read_outline_with_options(path: &Path, options: DecodeOptions) -> Result<Decoded> {
    LegacyReader::open_with_options(path, options)?.read_outline()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn empty_source_decodes_to_bare_trees() {
        let decoded = LegacyReader::new(Cursor::new(Vec::new()))
            .read_outline()
            .unwrap();
        assert!(decoded.outline.elements.is_empty());
        assert_eq!(decoded.outline.outline.roots().len(), 2);
    }

    #[test]
    fn truncated_source_is_a_decode_error() {
        let err = LegacyReader::new(Cursor::new(vec![b'V', b'R']))
            .read_outline()
            .unwrap_err();
        assert!(matches!(err, LegacyError::Decode(_)));
    }

    #[test]
    fn missing_file() {
        let err = read_outline(Path::new("/no/such/outline.otl")).unwrap_err();
        assert!(matches!(err, LegacyError::FileNotFound { .. }));
    }
}
