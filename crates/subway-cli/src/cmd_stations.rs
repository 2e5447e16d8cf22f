use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use subway::v1::{Line, Station};

use crate::doc;

#[derive(Debug, Serialize)]
struct StationsReport<'a> {
    line: &'a str,
    stations: Vec<Station>,
    total_distance: u64,
}

pub fn run(input: PathBuf, json: bool, pretty: bool) -> Result<()> {
    let line = doc::read_line(&input)?;
    println!("{}", format_stations(&line, json, pretty)?);
    Ok(())
}

fn format_stations(line: &Line, json: bool, pretty: bool) -> Result<String> {
    let stations = line.stations();
    if !json {
        let names: Vec<&str> = stations.iter().map(|s| s.as_str()).collect();
        return Ok(names.join("\n"));
    }

    let report = StationsReport {
        line: line.id().as_str(),
        stations,
        total_distance: line.total_distance(),
    };
    let out = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(out)
}
