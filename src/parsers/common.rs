use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Reads a source file as text.
///
/// Content is decoded lossily, so files in legacy encodings still yield
/// their ASCII include directives instead of failing the run.
pub fn read_source(file_path: &Path) -> Result<String> {
    read_file_optimized(file_path).map_err(|source| Error::FileRead {
        path: file_path.to_path_buf(),
        source,
    })
}

fn read_file_optimized(file_path: &Path) -> io::Result<String> {
    let file = File::open(file_path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);

    let mut content = Vec::with_capacity(file_size);
    reader.read_to_end(&mut content)?;
    Ok(match String::from_utf8(content) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
