use clap::Parser;
use img_prep::batch::{batch_compress, batch_convert, batch_remote};
use img_prep::cli::{Args, Commands};
use img_prep::compress::CompressOptions;
use img_prep::remote::RemoteClient;
use img_prep::{logger, Result};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::configure(args.quiet, args.verbose);

    match args.command {
        Commands::Compress {
            directory,
            quality,
            width,
            height,
            keep_exif,
        } => {
            let options = CompressOptions::new(quality, width, height, keep_exif)?;
            batch_compress(&directory, &options)?;
        }
        Commands::Remote {
            directory,
            api_key,
            endpoint,
        } => {
            let client = build_remote_client(api_key, endpoint)?;
            batch_remote(&directory, &client)?;
        }
        Commands::Convert { directory } => {
            batch_convert(&directory)?;
        }
    }

    Ok(())
}

fn build_remote_client(api_key: Option<String>, endpoint: Option<String>) -> Result<RemoteClient> {
    let client = match api_key {
        Some(key) => RemoteClient::new(key),
        None => RemoteClient::from_env()?,
    };
    Ok(match endpoint {
        Some(endpoint) => client.at_endpoint(endpoint),
        None => client,
    })
}
