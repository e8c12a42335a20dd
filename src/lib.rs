pub mod batch;
pub mod cli;
pub mod compress;
pub mod constants;
pub mod convert;
pub mod error;
pub mod logger;
pub mod outcome;
pub mod remote;
pub mod select;

pub use batch::{batch_compress, batch_convert, batch_remote, for_each_image, BatchSummary};
pub use compress::{compress_in_place, resize_to, CompressOptions};
pub use convert::convert_to_webp;
pub use error::{OptimizeError, Result};
pub use outcome::Outcome;
pub use remote::{compress_remote, RemoteClient};
pub use select::{is_image_file, select_images};
