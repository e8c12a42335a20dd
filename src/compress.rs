use crate::constants::{
    DEFAULT_QUALITY, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MAX_QUALITY, MIN_QUALITY,
    ZOPFLI_ITERATIONS,
};
use crate::error::{OptimizeError, Result};
use crate::outcome::Outcome;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use img_parts::jpeg::Jpeg;
use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF};
use oxipng::Deflaters;
use std::fs;
use std::io::{Cursor, Write};
use std::num::NonZeroU8;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct CompressOptions {
    pub quality: u8,
    pub resize: Option<(u32, u32)>,
    pub preserve_metadata: bool,
}

impl CompressOptions {
    pub fn new(
        quality: Option<u8>,
        width: Option<u32>,
        height: Option<u32>,
        preserve_metadata: bool,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(OptimizeError::InvalidQuality(quality));
        }

        let resize = match (width, height) {
            (None, None) => None,
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            // One-sided or zero targets are rejected rather than guessed at.
            _ => return Err(OptimizeError::InvalidResizeTarget),
        };

        Ok(Self {
            quality,
            resize,
            preserve_metadata,
        })
    }
}

/// Compresses an image and overwrites it in place.
///
/// The file is decoded, optionally resized to the exact target dimensions,
/// re-encoded into its original container format at `options.quality`, and
/// atomically swapped over the original path. On any failure the original
/// file is left byte-identical to its pre-call state.
pub fn compress_in_place(path: &Path, options: &CompressOptions) -> Result<Outcome> {
    if !path.exists() {
        return Err(OptimizeError::FileNotFound(path.to_path_buf()));
    }

    let original_size = fs::metadata(path)?.len();
    let data = fs::read(path)?;

    let reader = ImageReader::new(Cursor::new(&data)).with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| OptimizeError::UnknownFormat(path.to_path_buf()))?;
    let mut img = reader.decode()?;

    let exif = if options.preserve_metadata {
        extract_exif(&data, format)
    } else {
        None
    };

    if let Some((width, height)) = options.resize {
        resize_to(&mut img, width, height);
    }

    let mut encoded = encode_image(&img, format, options.quality)?;
    if let Some(exif) = exif {
        encoded = embed_exif(encoded, format, exif)?;
    }

    write_atomically(path, &encoded)?;
    let new_size = fs::metadata(path)?.len();

    Ok(Outcome {
        path: path.to_path_buf(),
        original_size,
        new_size,
    })
}

/// Resamples to exactly `width` x `height` with a Lanczos3 filter. The aspect
/// ratio is not preserved; callers asking for a different ratio get a
/// distorted image, intentionally.
pub fn resize_to(img: &mut DynamicImage, width: u32, height: u32) {
    *img = img.resize_exact(width, height, image::imageops::FilterType::Lanczos3);
}

fn encode_image(img: &DynamicImage, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            img.write_with_encoder(encoder)?;
        }
        ImageFormat::Png => {
            img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
            buf = optimize_png_bytes(&buf, quality)?;
        }
        // The WebP encoder here is lossless-only; quality does not apply to
        // these containers.
        ImageFormat::WebP | ImageFormat::Gif | ImageFormat::Bmp => {
            img.write_to(&mut Cursor::new(&mut buf), format)?;
        }
        other => {
            return Err(OptimizeError::UnsupportedFormat(format!("{other:?}")));
        }
    }
    Ok(buf)
}

/// Runs the oxipng size-optimization pass, with the deflater level derived
/// from the requested quality.
fn optimize_png_bytes(png: &[u8], quality: u8) -> Result<Vec<u8>> {
    let mut options = oxipng::Options::from_preset(4);
    options.force = true;

    if quality >= 90 {
        options.deflate = Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        };
    } else if quality >= 70 {
        options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        };
    } else {
        options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        };
    }

    oxipng::optimize_from_memory(png, &options)
        .map_err(|e| OptimizeError::PngOptimization(e.to_string()))
}

/// Pulls the raw EXIF segment out of the original bytes, for the container
/// formats that carry one.
fn extract_exif(data: &[u8], format: ImageFormat) -> Option<Bytes> {
    match format {
        ImageFormat::Jpeg => Jpeg::from_bytes(Bytes::copy_from_slice(data)).ok()?.exif(),
        ImageFormat::WebP => WebP::from_bytes(Bytes::copy_from_slice(data)).ok()?.exif(),
        _ => None,
    }
}

fn embed_exif(encoded: Vec<u8>, format: ImageFormat, exif: Bytes) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Jpeg => {
            let mut jpeg = Jpeg::from_bytes(encoded.into())
                .map_err(|e| OptimizeError::Metadata(e.to_string()))?;
            jpeg.set_exif(Some(exif));
            Ok(jpeg.encoder().bytes().to_vec())
        }
        ImageFormat::WebP => {
            let mut webp = WebP::from_bytes(encoded.into())
                .map_err(|e| OptimizeError::Metadata(e.to_string()))?;
            webp.set_exif(Some(exif));
            Ok(webp.encoder().bytes().to_vec())
        }
        _ => Ok(encoded),
    }
}

/// Writes `data` to a temp file in the target's directory, then renames it
/// over `path`. The target is never observable in a half-written state.
pub(crate) fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    temp.write_all(data)?;
    temp.persist(path).map_err(|e| OptimizeError::Io(e.error))?;
    Ok(())
}
