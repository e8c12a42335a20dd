use crate::compress::write_atomically;
use crate::error::{OptimizeError, Result};
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Re-encodes an image as WebP next to the source: same directory, same
/// stem, `.webp` extension. The source file is never modified; an existing
/// file at the derived path is overwritten.
///
/// A source that is already `.webp` is returned as-is, since re-encoding
/// would overwrite the source itself.
pub fn convert_to_webp(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(OptimizeError::FileNotFound(path.to_path_buf()));
    }

    let webp_path = path.with_extension("webp");
    if webp_path == path {
        return Ok(webp_path);
    }

    let img = ImageReader::open(path)?.decode()?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)?;
    write_atomically(&webp_path, &buf)?;

    Ok(webp_path)
}
