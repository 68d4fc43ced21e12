use std::io::BufRead;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::DensityMap;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a density time-series from a whitespace-delimited text table.
///
/// Expected layout, one row per time sample, no header:
/// ```text
/// <time>  <density site 0>  <density site 1>  ...  <density site S-1>
/// ```
/// Every row must have the same column count (1 + S, with S ≥ 1).
pub fn load_table(path: &Path) -> Result<DensityMap> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_table(std::io::BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

/// Parse the table from any buffered reader. Split out from [`load_table`]
/// so tests can feed in-memory input.
pub fn parse_table<R: BufRead>(reader: R) -> Result<DensityMap> {
    let mut times = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<f64> = trimmed
            .split_whitespace()
            .enumerate()
            .map(|(col, tok)| {
                tok.parse::<f64>().with_context(|| {
                    format!("line {}, column {}: '{tok}' is not a number", line_no + 1, col + 1)
                })
            })
            .collect::<Result<_>>()?;

        if fields.len() < 2 {
            bail!(
                "line {}: expected a time value plus at least one site column, found {} field(s)",
                line_no + 1,
                fields.len()
            );
        }
        if let Some(first) = rows.first() {
            if fields.len() - 1 != first.len() {
                bail!(
                    "line {}: {} site column(s) but earlier rows have {}",
                    line_no + 1,
                    fields.len() - 1,
                    first.len()
                );
            }
        }

        times.push(fields[0]);
        rows.push(fields[1..].to_vec());
    }

    if rows.is_empty() {
        bail!("no data rows found");
    }
    if times.windows(2).any(|w| w[1] < w[0]) {
        log::warn!("time axis is not monotonically non-decreasing");
    }

    Ok(DensityMap { times, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_well_formed_table() {
        let input = "0.0 0.1 0.2 0.3\n0.5 0.4 0.5 0.6\n\n1.0 0.7 0.8 0.9\n";
        let map = parse_table(Cursor::new(input)).unwrap();
        assert_eq!(map.n_times(), 3);
        assert_eq!(map.n_sites(), 3);
        assert_eq!(map.times, vec![0.0, 0.5, 1.0]);
        assert_eq!(map.value(1, 2), 0.6);
    }

    #[test]
    fn rejects_ragged_rows() {
        let input = "0.0 0.1 0.2\n0.5 0.4\n";
        let err = parse_table(Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let input = "0.0 0.1\n0.5 abc\n";
        let err = parse_table(Cursor::new(input)).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("'abc' is not a number"));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_table(Cursor::new("")).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn rejects_time_only_rows() {
        let err = parse_table(Cursor::new("0.0\n1.0\n")).unwrap_err();
        assert!(err.to_string().contains("at least one site column"));
    }
}
