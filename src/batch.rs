use crate::compress::{compress_in_place, CompressOptions};
use crate::convert::convert_to_webp;
use crate::error::Result;
use crate::outcome::Outcome;
use crate::remote::{compress_remote, RemoteClient};
use crate::select::select_images;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl BatchSummary {
    pub fn reduction_percent(&self) -> f64 {
        if self.bytes_before == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_after as f64 / self.bytes_before as f64) * 100.0
    }
}

/// Runs `op` once per image file in `directory`, sequentially.
///
/// Per-file failures are logged and counted, never propagated: one bad file
/// does not abort the batch. Only enumeration of the directory itself can
/// fail this function.
pub fn for_each_image<F>(directory: &Path, label: &str, mut op: F) -> Result<BatchSummary>
where
    F: FnMut(&Path) -> Result<Outcome>,
{
    let image_files = select_images(directory)?;
    let mut summary = BatchSummary {
        total: image_files.len(),
        ..Default::default()
    };

    if image_files.is_empty() {
        crate::info!("⚠️  No image files found in {:?}", directory);
        return Ok(summary);
    }

    crate::info!("🚀 {}: {} image files in {:?}", label, summary.total, directory);

    let progress = ProgressBar::new(summary.total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for path in &image_files {
        crate::verbose!("Processing {:?}", path);
        progress.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        match op(path.as_path()) {
            Ok(outcome) => {
                crate::info!(
                    "✅ {:?}: {} -> {} bytes ({:.2}% reduction)",
                    path,
                    outcome.original_size,
                    outcome.new_size,
                    outcome.reduction_percent()
                );
                summary.processed += 1;
                summary.bytes_before += outcome.original_size;
                summary.bytes_after += outcome.new_size;
            }
            Err(e) => {
                crate::error!("Failed to process {:?}: {}", path, e);
                summary.failed += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    print_summary(label, &summary);
    Ok(summary)
}

fn print_summary(label: &str, summary: &BatchSummary) {
    crate::info!("\n📊 {} summary:", label);
    crate::info!("  📁 Files processed: {}/{}", summary.processed, summary.total);
    if summary.failed > 0 {
        crate::info!("  ⚠️  Failed files: {}", summary.failed);
    }
    crate::info!("  📊 Total size before: {} bytes", summary.bytes_before);
    crate::info!("  📈 Total size after: {} bytes", summary.bytes_after);
    crate::info!("  🎯 Overall reduction: {:.1}%", summary.reduction_percent());
}

/// Local compress pass over every image in the directory.
pub fn batch_compress(directory: &Path, options: &CompressOptions) -> Result<BatchSummary> {
    for_each_image(directory, "Compressing", |path| {
        compress_in_place(path, options)
    })
}

/// Remote compress pass; each file costs one service call.
pub fn batch_remote(directory: &Path, client: &RemoteClient) -> Result<BatchSummary> {
    for_each_image(directory, "Compressing via Tinify", |path| {
        compress_remote(path, client)
    })
}

/// WebP conversion pass. The outcome compares the source size against the
/// derived file's size; the source itself is untouched.
pub fn batch_convert(directory: &Path) -> Result<BatchSummary> {
    for_each_image(directory, "Converting to WebP", |path| {
        let original_size = fs::metadata(path)?.len();
        let webp_path = convert_to_webp(path)?;
        let new_size = fs::metadata(&webp_path)?.len();
        Ok(Outcome {
            path: webp_path,
            original_size,
            new_size,
        })
    })
}
