use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::optimize::OptimizeArgs;

mod file_utils;
mod geocode;
mod optimize;
mod parsers;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a list of delivery addresses between trucks
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Resolve a single address to coordinates
    #[command(visible_alias = "g")]
    Geocode {
        address: String,

        /// Region appended to the address when missing, defaults to COURIER_REGION
        #[arg(long)]
        region: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Optimize { args }) => optimize::run(args).await?,
        Some(Commands::Geocode { address, region }) => geocode::run(&address, region).await?,
        None => {}
    }

    Ok(())
}
