use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-prep",
    about = "Batch-prepare images for upload: compress, resize, convert, or shrink via the Tinify API",
    long_about = "img-prep walks a directory of images and applies one operation per file: \
                  local recompression (with optional exact resize and EXIF carry-over), \
                  remote compression through the Tinify API, or conversion to WebP. \
                  Files are processed one at a time; a bad file is logged and skipped.",
    version,
    after_help = "EXAMPLES:\n  \
    img-prep compress ./assets -q 85 --width 800 --height 600 --keep-exif\n  \
    img-prep remote ./assets\n  \
    img-prep convert ./assets"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Suppress informational output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Print extra diagnostic output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Recompress every image in a directory in place",
        long_about = "Decode, optionally resize, and re-encode each image into its original \
                      format at the given quality, overwriting the source file. PNG output \
                      additionally goes through an oxipng optimization pass."
    )]
    Compress {
        #[arg(help = "Directory containing the images")]
        directory: PathBuf,

        #[arg(
            short = 'q',
            long,
            help = "Compression quality (1-100, default: 85)",
            long_help = "Compression quality from 1 (lowest) to 100 (highest). \
                         For PNG: >=90 uses Zopfli, >=70 uses high libdeflater compression. \
                         WebP files are re-encoded losslessly, so quality has no effect on them."
        )]
        quality: Option<u8>,

        #[arg(
            short = 'w',
            long,
            requires = "height",
            help = "Exact target width in pixels",
            long_help = "Resize every image to exactly this width. Must be given together \
                         with --height; the aspect ratio is not preserved."
        )]
        width: Option<u32>,

        #[arg(
            short = 'H',
            long,
            requires = "width",
            help = "Exact target height in pixels",
            long_help = "Resize every image to exactly this height. Must be given together \
                         with --width; the aspect ratio is not preserved."
        )]
        height: Option<u32>,

        #[arg(
            long,
            help = "Carry EXIF metadata over to the re-encoded file",
            long_help = "Copy the EXIF segment (camera, orientation, timestamps) from the \
                         original into the re-encoded file. JPEG and WebP only."
        )]
        keep_exif: bool,
    },

    #[command(
        about = "Compress every image in a directory through the Tinify API",
        long_about = "Upload each image to the Tinify service, download the optimized bytes, \
                      and overwrite the source file. Each file consumes one API call; failed \
                      calls are logged and skipped without retry."
    )]
    Remote {
        #[arg(help = "Directory containing the images")]
        directory: PathBuf,

        #[arg(
            long,
            help = "Tinify API key (default: the TINIFY_API_KEY environment variable)"
        )]
        api_key: Option<String>,

        #[arg(long, help = "Override the Tinify API endpoint")]
        endpoint: Option<String>,
    },

    #[command(
        about = "Convert every image in a directory to WebP",
        long_about = "Write a WebP sibling (same stem, .webp extension) for each image. \
                      Source files are left untouched."
    )]
    Convert {
        #[arg(help = "Directory containing the images")]
        directory: PathBuf,
    },
}
