//! Opening of plain or gzip-compressed text sources.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns true when the first bytes of `reader` are the gzip magic number.
/// The reader is rewound to its start.
pub fn is_gzip<R: Read + Seek>(reader: &mut R) -> Result<bool, Error> {
    let mut magic = [0u8; 2];
    let mut filled = 0;
    while filled < magic.len() {
        let n = reader.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.seek(SeekFrom::Start(0))?;
    Ok(filled == magic.len() && magic == GZIP_MAGIC)
}

/// Opens a text file, decompressing it when it is gzip.
///
/// The returned reader owns the file handle, which is closed when it is dropped.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let mut file = File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to open {}: {e}", path.display()),
        ))
    })?;

    if is_gzip(&mut file)? {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
