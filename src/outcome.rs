use std::path::PathBuf;

/// Result of one successful per-file operation: where the bytes ended up and
/// how the size changed.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub path: PathBuf,
    pub original_size: u64,
    pub new_size: u64,
}

impl Outcome {
    /// `(1 - new/original) * 100`. Negative when the file grew; that is
    /// reported as-is, not treated as a failure.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.new_size as f64 / self.original_size as f64) * 100.0
    }

    pub fn bytes_saved(&self) -> i64 {
        self.original_size as i64 - self.new_size as i64
    }
}
