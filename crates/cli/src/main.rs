//! Shopfeed CLI - Product and catalog import tools.
//!
//! # Usage
//!
//! ```bash
//! # Publish a single product from its storefront URL
//! shopfeed import product -u https://shop.example.com/products/widget
//!
//! # Publish the first page of a store's catalog feed
//! shopfeed import store -u https://shop.example.com
//!
//! # Show the locations usable for inventory assignment
//! shopfeed locations -f locations.json
//! ```
//!
//! # Commands
//!
//! - `import product` - Publish one product scraped from a product page
//! - `import store` - Publish a store's catalog feed
//! - `locations` - Resolve the fulfillment locations for the configured store
//!
//! Store credentials are read from the environment; see
//! [`shopfeed_publisher::PublisherConfig`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopfeed")]
#[command(author, version, about = "Shopfeed catalog publishing tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import products into the configured store
    Import {
        #[command(subcommand)]
        source: ImportSource,
    },
    /// Show the locations usable for inventory assignment
    Locations {
        /// Path to the synced-locations JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ImportSource {
    /// Publish a single product from its storefront URL
    Product {
        /// Product page URL (fetched as `{url}.json`)
        #[arg(short, long)]
        url: String,
    },
    /// Publish every product on the first page of a store's catalog feed
    Store {
        /// Store base URL (fetched as `{url}/products.json?page=1&limit=250`)
        #[arg(short, long)]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Import { source } => match source {
            ImportSource::Product { url } => commands::import::product(&url).await?,
            ImportSource::Store { url } => commands::import::store(&url).await?,
        },
        Commands::Locations { file } => commands::locations::show(&file)?,
    }
    Ok(())
}
