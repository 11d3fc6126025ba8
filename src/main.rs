//! Main entry point for the polyglot translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod eval;
mod providers;
mod server;

use cli::commands::Commands;

/// Polyglot Translator - multi-provider LLM translation and evaluation tool
#[derive(Parser, Debug)]
#[command(name = "polyglot-translator", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Execute command
    match args.command {
        Some(Commands::Translate {
            sentence,
            source,
            destination,
            llm,
        }) => {
            cli::commands::handle_translate(sentence, source, destination, llm).await?;
        }
        Some(Commands::Evaluate {
            report,
            corpus_dir,
            limit,
            llms,
        }) => {
            cli::commands::handle_evaluate(report, corpus_dir, limit, llms).await?;
        }
        Some(Commands::Server { host, port }) => {
            cli::commands::handle_server(host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
