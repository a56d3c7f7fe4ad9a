//! Line-oriented readers for the interactive mode.

use anyhow::{bail, Context, Result};
use std::io::BufRead;

/// Next line without its line terminator, or `None` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// A line holding a single integer.
pub fn read_line_with_number<R: BufRead>(reader: &mut R) -> Result<i32> {
    let line = read_line(reader)?.context("unexpected end of input, expected a number")?;
    line.trim().parse().with_context(|| format!("expected a number, got {line:?}"))
}

/// A ratings line: a count followed by that many integers.
pub fn read_ratings<R: BufRead>(reader: &mut R) -> Result<Vec<i32>> {
    let line = read_line(reader)?.context("unexpected end of input, expected ratings")?;
    let mut numbers = line.split_whitespace().map(|n| n.parse::<i32>().with_context(|| format!("bad rating {n:?}")));
    let count = match numbers.next() {
        Some(count) => count?,
        None => bail!("ratings line is blank, expected a count"),
    };
    let ratings = numbers.collect::<Result<Vec<_>>>()?;
    if count < 0 || ratings.len() != count as usize {
        bail!("ratings line announces {count} values but holds {}", ratings.len());
    }
    Ok(ratings)
}
