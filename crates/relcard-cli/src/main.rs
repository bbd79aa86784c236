//! relcard CLI - release card image generator
//!
//! Renders cards to files or serves them over HTTP.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use relcard_cli::commands;
use relcard_cli::commands::generate::GenerateArgs;
use relcard_cli::config::{ServerConfig, ServerOverrides};
use relcard_cli::logging::{init_logging, LoggingConfig};

/// relcard - deterministic release and social card images
#[derive(Parser)]
#[command(name = "relcard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one image to a file
    Generate(GenerateArgs),

    /// Serve images over HTTP at /api/generateImage
    Serve {
        /// JSON config file (flags override its values)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory containing {family}-{weight}.ttf files
        #[arg(long)]
        fonts_dir: Option<PathBuf>,

        /// Renders allowed to run at once
        #[arg(long)]
        max_concurrent_renders: Option<usize>,

        /// Per-request render timeout in seconds (0 disables)
        #[arg(long)]
        timeout: Option<u64>,

        /// JPEG quality, 1-100
        #[arg(long)]
        jpeg_quality: Option<u8>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(&args),
        Commands::Serve {
            config,
            host,
            port,
            fonts_dir,
            max_concurrent_renders,
            timeout,
            jpeg_quality,
        } => {
            let overrides = ServerOverrides {
                host,
                port,
                fonts_dir,
                max_concurrent_renders,
                request_timeout_secs: timeout,
                jpeg_quality,
            };
            ServerConfig::load(config.as_deref(), overrides).and_then(commands::serve::run)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
