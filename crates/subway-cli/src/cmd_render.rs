use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use crate::doc;

#[derive(Subcommand, Debug)]
pub enum RenderFormat {
    /// Render as Graphviz DOT
    Dot {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave section distances off the edges
        #[arg(long)]
        hide_distances: bool,

        /// Show the line's total distance in the title
        #[arg(long)]
        show_total: bool,

        /// Draw terminal stations like any other station
        #[arg(long)]
        plain_terminals: bool,
    },
}

pub fn run(format: RenderFormat) -> Result<()> {
    match format {
        RenderFormat::Dot {
            input,
            output,
            hide_distances,
            show_total,
            plain_terminals,
        } => {
            let options = subway_dot::RenderOptions {
                show_distances: !hide_distances,
                show_total,
                highlight_terminals: !plain_terminals,
            };
            run_dot(input, output, &options)
        }
    }
}

fn run_dot(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    options: &subway_dot::RenderOptions,
) -> Result<()> {
    let line = doc::read_line_or_stdin(input.as_deref())?;
    let dot = subway_dot::render(&line, options);

    if let Some(path) = &output {
        std::fs::write(path, &dot).with_context(|| format!("Failed to write {:?}", path))?;
    } else {
        print!("{}", dot);
    }

    Ok(())
}
