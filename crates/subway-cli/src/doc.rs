use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use subway::v1::Line;

pub fn read_line(path: &Path) -> Result<Line> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    Line::from_json(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Read from `path`, or from stdin when no path is given.
pub fn read_line_or_stdin(path: Option<&Path>) -> Result<Line> {
    if let Some(path) = path {
        return read_line(path);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Line::from_json(&buf).context("Failed to parse line document")
}

pub fn to_json(line: &Line, pretty: bool) -> Result<String> {
    let json = if pretty {
        line.to_json_pretty()?
    } else {
        line.to_json()?
    };
    Ok(json)
}

/// Write the document to `path`, or print it when no path is given.
pub fn emit(line: &Line, path: Option<&Path>, pretty: bool) -> Result<()> {
    let json = to_json(line, pretty)?;
    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::debug!(path = ?path, line = %line.id(), "line document written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
