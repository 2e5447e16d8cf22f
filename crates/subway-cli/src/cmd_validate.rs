use anyhow::{Context, Result};
use std::path::PathBuf;
use subway::v1::Line;

pub fn run(input: PathBuf) -> Result<()> {
    let content =
        std::fs::read_to_string(&input).with_context(|| format!("Failed to read {:?}", input))?;
    println!("{}", validate_content(&content)?);
    Ok(())
}

fn validate_content(content: &str) -> Result<String> {
    match Line::from_json(content) {
        Ok(line) => {
            let summary = match line.sections().terminals() {
                Some((start, end)) => format!(
                    "{} (id: {}, {} stations, {} -> {}, distance {})",
                    line.name(),
                    line.id(),
                    line.sections().len() + 1,
                    start,
                    end,
                    line.total_distance()
                ),
                None => format!("{} (id: {}, no sections)", line.name(), line.id()),
            };
            Ok(format!("Valid: {}", summary))
        }
        Err(e) => Err(anyhow::anyhow!("Invalid: {}", e)),
    }
}
