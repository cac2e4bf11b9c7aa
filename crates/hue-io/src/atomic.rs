//! All-or-nothing file output.
//!
//! Data goes to a temporary file next to the target and is renamed over
//! it only once fully written. On failure the temporary file is removed
//! and any existing target is left as it was.

use crate::error::{IoError, IoResult};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::trace;

/// Writes `path` atomically using `write` to produce the contents.
///
/// Missing parent directories are created.
pub fn write_atomic<P, F>(path: P, write: F) -> IoResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> IoResult<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;

    trace!(path = %path.display(), "written");
    Ok(())
}

/// Writes `bytes` to `path` atomically.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> IoResult<()> {
    write_atomic(path, |out| Ok(out.write_all(bytes)?))
}

/// Encodes `img` as PNG and writes it to `path` atomically.
pub fn write_png_atomic<P: AsRef<Path>>(path: P, img: &RgbImage) -> IoResult<()> {
    write_atomic(path, |out| {
        PngEncoder::new(out)
            .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
            .map_err(|e| IoError::Encode(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");
        write_bytes_atomic(&path, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        write_bytes_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_failure_keeps_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        let result = write_atomic(&path, |out| {
            out.write_all(b"partial")?;
            Err(IoError::Validation("boom".into()))
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");

        // temp file cleaned up
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
