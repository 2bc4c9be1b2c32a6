//! Functions for reading/writing curves in CSV format.
pub use csv::Error;
use csv::{ReaderBuilder, Writer};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Row {
    travel: f64,
    leverage: f64,
}

/// Parse a curve from CSV with a `travel,leverage` header, `#` starts a
/// comment line.
pub fn parse_csv(s: &str) -> Result<Vec<[f64; 2]>, Error> {
    ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(s.as_bytes())
        .deserialize()
        .map(|row| row.map(|Row { travel, leverage }| [travel, leverage]))
        .collect()
}

/// Dump a curve to CSV with a `travel,leverage` header.
pub fn dump_csv(curve: &[[f64; 2]]) -> Result<String, Error> {
    let mut w = Writer::from_writer(Vec::new());
    for &[travel, leverage] in curve {
        w.serialize(Row { travel, leverage })?;
    }
    let buf = w.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_and_parse() {
        let curve = [[0., 3.25], [80., 2.75], [160., 2.5]];
        let s = dump_csv(&curve).unwrap();
        assert_eq!(s.lines().next(), Some("travel,leverage"));
        assert_eq!(s.lines().count(), 4);
        assert_eq!(parse_csv(&s).unwrap(), curve);
        let s = "# patrol\ntravel,leverage\n0, 3.2\n160, 2.3\n";
        assert_eq!(parse_csv(s).unwrap(), [[0., 3.2], [160., 2.3]]);
    }
}
