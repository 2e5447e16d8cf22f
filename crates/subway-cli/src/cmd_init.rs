use anyhow::{Context, Result};
use std::path::PathBuf;
use subway::v1::{Line, Section};

use crate::doc;

#[derive(Debug)]
pub struct InitArgs {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub up: String,
    pub down: String,
    pub distance: u32,
}

pub fn run(args: InitArgs, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let line = build_line(args)?;
    tracing::info!(line = %line.id(), "line created");
    doc::emit(&line, output.as_deref(), pretty)
}

fn build_line(args: InitArgs) -> Result<Line> {
    let mut line = Line::new(args.id, args.name);
    if let Some(color) = args.color {
        line = line.with_color(color);
    }
    let section = Section::new(args.up, args.down, args.distance)
        .context("Invalid first section")?;
    line.add_section(section)?;
    Ok(line)
}
