mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "trawl",
    version,
    about = "Match business capabilities to historical government procurement spend"
)]
struct Cli {
    /// Cleaned contract-notice CSV (overrides the config file)
    #[arg(long, global = true, env = "TRAWL_DATA", value_name = "FILE")]
    data: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List dataset categories that contain any of the keywords
    Categories {
        /// Free-text keywords (case-insensitive substring match)
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Rank agencies by spend in the matched categories
    Agencies {
        #[arg(short, long = "keyword", value_name = "KEYWORD", required = true)]
        keywords: Vec<String>,

        /// Number of agencies to show (default from config: 8)
        #[arg(short, long)]
        top: Option<usize>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Rank suppliers by value won in the matched categories
    Suppliers {
        #[arg(short, long = "keyword", value_name = "KEYWORD", required = true)]
        keywords: Vec<String>,

        /// Only count contracts whose agency contains this text
        #[arg(short, long)]
        agency: Option<String>,

        /// Number of suppliers to show (default from config: 5)
        #[arg(short, long)]
        top: Option<usize>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List contracts in the matched categories that end soon
    Expiring {
        #[arg(short, long = "keyword", value_name = "KEYWORD", required = true)]
        keywords: Vec<String>,

        /// Horizon in months (default from config: 6)
        #[arg(short, long)]
        months: Option<u32>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Summarize spend for a keyword list or a capability profile
    Summary {
        #[arg(
            short,
            long = "keyword",
            value_name = "KEYWORD",
            required_unless_present = "profile"
        )]
        keywords: Vec<String>,

        /// Capability profile JSON (summary, keywords, url, confidence)
        #[arg(short, long, value_name = "FILE", conflicts_with = "keywords")]
        profile: Option<PathBuf>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print an overview of the whole dataset
    Stats {
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Clean a combined CSV export into a loadable snapshot
    Clean {
        /// Raw combined export (CSV)
        input_file: PathBuf,

        /// Where to write the cleaned snapshot
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("trawl=debug,trawl_core=debug,warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("trawl_core=info,warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::Context::new(cli.config.as_deref(), cli.data).and_then(|ctx| {
        match cli.command {
            Commands::Categories { keywords, output } => {
                commands::query::categories(&ctx, &keywords, &output)
            }
            Commands::Agencies {
                keywords,
                top,
                output,
            } => commands::query::agencies(&ctx, &keywords, top, &output),
            Commands::Suppliers {
                keywords,
                agency,
                top,
                output,
            } => commands::query::suppliers(&ctx, &keywords, agency.as_deref(), top, &output),
            Commands::Expiring {
                keywords,
                months,
                output,
            } => commands::query::expiring(&ctx, &keywords, months, &output),
            Commands::Summary {
                keywords,
                profile,
                output,
            } => commands::summary::run(&ctx, keywords, profile, &output),
            Commands::Stats { output } => commands::stats::run(&ctx, &output),
            Commands::Clean { input_file, out } => commands::clean::run(&input_file, &out),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
