//! Tessera command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tessera::cli::output::{self, ColorMode, OutputFormat};
use tessera::cli::{compare, info, sniff};
use tessera::{SnifferOptions, TypeTag};
use tracing_subscriber::EnvFilter;

/// Tessera value tools
#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Inspect, compare and infer tagged values", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the narrowest type of each column of a text file
    Sniff {
        /// Input file (default: stdin)
        file: Option<PathBuf>,

        /// Field delimiter; without one every line is a single sample
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Treat the first line as column names
        #[arg(long)]
        header: bool,

        /// Keep surrounding whitespace in samples
        #[arg(long)]
        no_trim: bool,

        /// Count empty fields as samples instead of nulls
        #[arg(long)]
        keep_empty: bool,
    },

    /// Compare two values, promoting their types as needed
    Compare {
        /// Left value
        left: String,

        /// Right value
        right: String,

        /// Type of the left value (sniffed when omitted)
        #[arg(long)]
        left_type: Option<TypeTag>,

        /// Type of the right value (sniffed when omitted)
        #[arg(long)]
        right_type: Option<TypeTag>,
    },

    /// Show metadata of a type tag
    Info {
        /// Type name, e.g. int32, decimal, guid
        tag: TypeTag,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Sniff {
            file,
            delimiter,
            header,
            no_trim,
            keep_empty,
        } => {
            let config = sniff::SniffConfig {
                file,
                delimiter,
                header,
                options: SnifferOptions {
                    trim: !no_trim,
                    empty_as_null: !keep_empty,
                },
                output_format: cli.format,
                output_file: cli.output,
            };
            sniff::sniff(config)
        }

        Commands::Compare {
            left,
            right,
            left_type,
            right_type,
        } => {
            let config = compare::CompareConfig {
                left,
                right,
                left_type,
                right_type,
                output_format: cli.format,
                output_file: cli.output,
            };
            compare::compare(config)
        }

        Commands::Info { tag } => {
            let config = info::InfoConfig {
                tag,
                output_format: cli.format,
                output_file: cli.output,
            };
            info::info(config)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
