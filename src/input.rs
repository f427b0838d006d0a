//! Readers for the whitespace-delimited text formats.

use crate::errors::{Result, invalid_input};
use itertools::Itertools;
use std::io::BufRead;
use std::str::FromStr;

fn parse_field<T: FromStr>(field: &str, lineno: usize, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| invalid_input(format!("line {lineno}: cannot parse {what} '{field}'")))
}

/// Read a file with two whitespace-separated columns per line.
///
/// Blank lines are skipped. Any other line must have exactly two fields.
pub fn read_columns<R, A, B>(reader: R, first: &str, second: &str) -> Result<Vec<(A, B)>>
where
    R: BufRead,
    A: FromStr,
    B: FromStr,
{
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;
        let fields = line.split_whitespace().collect_vec();
        match fields[..] {
            [] => continue,
            [a, b] => rows.push((
                parse_field(a, lineno, first)?,
                parse_field(b, lineno, second)?,
            )),
            _ => {
                return Err(invalid_input(format!(
                    "line {lineno}: expected 2 columns, got {}",
                    fields.len()
                )));
            }
        }
    }
    Ok(rows)
}

/// Read all whitespace-separated integers of a file, regardless of line structure.
pub fn read_integers<R: BufRead>(reader: R) -> Result<Vec<i64>> {
    let mut values = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        for field in line.split_whitespace() {
            values.push(parse_field(field, i + 1, "integer")?);
        }
    }
    Ok(values)
}
