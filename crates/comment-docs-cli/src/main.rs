//! comment-docs CLI
//!
//! Extracts YAML documents from source block comments and builds site
//! metadata from them.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// comment-docs - YAML front-matter from source comments
#[derive(Parser)]
#[command(name = "comment-docs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file or project directory
    #[arg(short, long, default_value = "comment-docs.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new comment-docs project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the comment documents of one source file as JSON
    Extract {
        /// Source file to read
        file: String,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Run the build and write the resulting metadata as JSON
    Build {
        /// Output path (defaults to `output` from the config, then stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate configuration and every configured source file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref()).await?;
        }
        Commands::Extract { file, compact } => {
            commands::extract::run(&file, compact).await?;
        }
        Commands::Build { output } => {
            commands::build::run(&cli.config, output.as_deref()).await?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config).await?;
        }
    }

    Ok(())
}
