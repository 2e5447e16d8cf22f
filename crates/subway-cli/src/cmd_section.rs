use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;
use subway::v1::{Line, Section, Station};

use crate::doc;

#[derive(Subcommand, Debug)]
pub enum SectionOp {
    /// Insert a section, shortening the section it subdivides
    Add {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Up station of the new section
        #[arg(long)]
        up: String,

        /// Down station of the new section
        #[arg(long)]
        down: String,

        /// Distance of the new section
        #[arg(long)]
        distance: u32,

        /// Write the updated line back to the input file instead of stdout
        #[arg(long)]
        write: bool,
    },
    /// Remove a station, merging the sections on either side of it
    Remove {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Station to remove
        #[arg(long)]
        station: String,

        /// Write the updated line back to the input file instead of stdout
        #[arg(long)]
        write: bool,
    },
}

pub fn run(op: SectionOp, pretty: bool) -> Result<()> {
    match op {
        SectionOp::Add {
            input,
            up,
            down,
            distance,
            write,
        } => run_add(input, up, down, distance, write, pretty),
        SectionOp::Remove {
            input,
            station,
            write,
        } => run_remove(input, station, write, pretty),
    }
}

fn run_add(
    input: PathBuf,
    up: String,
    down: String,
    distance: u32,
    write: bool,
    pretty: bool,
) -> Result<()> {
    let mut line = doc::read_line(&input)?;
    add_section(&mut line, up, down, distance)?;
    doc::emit(&line, write.then_some(input.as_path()), pretty)
}

fn run_remove(input: PathBuf, station: String, write: bool, pretty: bool) -> Result<()> {
    let mut line = doc::read_line(&input)?;
    remove_station(&mut line, station)?;
    doc::emit(&line, write.then_some(input.as_path()), pretty)
}

fn add_section(line: &mut Line, up: String, down: String, distance: u32) -> Result<()> {
    let section = Section::new(up, down, distance).context("Invalid section")?;
    line.add_section(section)
        .with_context(|| format!("Cannot add section to line {}", line.id()))
}

fn remove_station(line: &mut Line, station: String) -> Result<Section> {
    let station = Station::new(station);
    line.remove_station(&station)
        .with_context(|| format!("Cannot remove {} from line {}", station, line.id()))
}
