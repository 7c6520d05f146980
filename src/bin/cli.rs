//! kvcache CLI Client
//!
//! Command-line interface for interacting with a kvcache server.

use clap::{Parser, Subcommand};
use kvcache::Client;

/// kvcache CLI
#[derive(Parser, Debug)]
#[command(name = "kvcache-cli")]
#[command(about = "CLI for the kvcache key-value cache")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Show server hit/miss statistics
    Stats,
}

fn run(args: Args) -> kvcache::Result<()> {
    let mut client = Client::connect(&args.server)?;

    match args.command {
        Commands::Get { key } => {
            let value = client.get(key.as_bytes())?;
            if value.is_empty() {
                println!("(nil)");
            } else {
                println!("{}", String::from_utf8_lossy(&value));
            }
        }
        Commands::Set { key, value } => {
            client.set(key.as_bytes(), value.as_bytes())?;
            println!("OK");
        }
        Commands::Del { key } => {
            client.delete(key.as_bytes())?;
            println!("OK");
        }
        Commands::Stats => {
            println!("{}", client.stats_text()?);
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
