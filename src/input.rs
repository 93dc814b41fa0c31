//! Reading input series (TEX86 or sea temperature) from text files.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Parses a series of numbers separated by commas, whitespace or newlines.
///
/// Text after `#` on a line is ignored.
pub fn parse_series(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((data, _)) => data,
            None => line,
        };
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token
                .parse()
                .with_context(|| format!("line {}: invalid number {token:?}", lineno + 1))?;
            values.push(value);
        }
    }
    if values.is_empty() {
        bail!("input contains no values");
    }
    Ok(values)
}

/// Reads a series from `path`.
pub fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    parse_series(&text).with_context(|| format!("failed to parse input file: {}", path.display()))
}
