mod cmd_init;
mod cmd_render;
mod cmd_section;
mod cmd_stations;
mod cmd_validate;
mod doc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter (e.g. `subway=debug`).
const LOG_ENV: &str = "SUBWAY_LOG";

#[derive(Parser, Debug)]
#[command(name = "subway")]
#[command(about = "Build, edit, and visualize transit line section chains")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a line document from its first section
    Init {
        /// Line identifier
        #[arg(long)]
        id: String,

        /// Line name
        #[arg(long)]
        name: String,

        /// Line color (any Graphviz color, e.g. "green" or "#00a84d")
        #[arg(long)]
        color: Option<String>,

        /// Up station of the first section
        #[arg(long)]
        up: String,

        /// Down station of the first section
        #[arg(long)]
        down: String,

        /// Distance of the first section
        #[arg(long)]
        distance: u32,

        /// Output file (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Insert sections or remove stations
    Section {
        #[command(subcommand)]
        op: cmd_section::SectionOp,
    },
    /// Print stations in travel order
    Stations {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a line document
    Validate {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Render a line document to other formats
    Render {
        #[command(subcommand)]
        format: cmd_render::RenderFormat,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            id,
            name,
            color,
            up,
            down,
            distance,
            output,
        } => cmd_init::run(
            cmd_init::InitArgs {
                id,
                name,
                color,
                up,
                down,
                distance,
            },
            output,
            cli.pretty,
        ),
        Commands::Section { op } => cmd_section::run(op, cli.pretty),
        Commands::Stations { input, json } => cmd_stations::run(input, json, cli.pretty),
        Commands::Validate { input } => cmd_validate::run(input),
        Commands::Render { format } => cmd_render::run(format),
    }
}

/// Log to stderr so stdout stays clean for documents.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
