// src/io/arrivals.rs

//! Reading and writing arrival tables.
//!
//! An arrival table is a headerless CSV file. Each row starts with a round
//! number, followed by `(start, target)` floor pairs for the people who arrive
//! in that round:
//!
//! ```csv
//! 0,1,4,2,1
//! 3,5,1
//! ```
//!
//! Empty fields (trailing commas) are ignored. Anything else that is not an
//! integer is rejected.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::model::person::Floor;

/// Round number -> `(start, target)` pairs, in file order.
pub type ArrivalTable = BTreeMap<usize, Vec<(Floor, Floor)>>;

pub fn load_arrival_table(path: &Path) -> SimResult<ArrivalTable> {
    let file = File::open(path)?;
    parse_arrival_table(file)
}

/// Like [`load_arrival_table`] but accepts any `Read` source.
pub fn parse_arrival_table<R: Read>(reader: R) -> SimResult<ArrivalTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = ArrivalTable::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let tokens: Vec<&str> = record.iter().filter(|t| !t.is_empty()).collect();
        let Some((round_token, floor_tokens)) = tokens.split_first() else {
            return Err(parse_error(line, "row has no round number"));
        };

        let round: usize = round_token
            .parse()
            .map_err(|_| parse_error(line, format!("invalid round number '{round_token}'")))?;

        if floor_tokens.len() % 2 != 0 {
            return Err(parse_error(
                line,
                format!("{} floor values do not form start/target pairs", floor_tokens.len()),
            ));
        }

        let floors = floor_tokens
            .iter()
            .map(|token| {
                token
                    .parse::<Floor>()
                    .map_err(|_| parse_error(line, format!("invalid floor '{token}'")))
            })
            .collect::<SimResult<Vec<Floor>>>()?;

        let pairs: Vec<(Floor, Floor)> = floors.chunks_exact(2).map(|p| (p[0], p[1])).collect();

        if table.insert(round, pairs).is_some() {
            warn!(round, line, "arrival table repeats a round; the later row wins");
        }
    }

    Ok(table)
}

/// Writes `table` in the format [`parse_arrival_table`] reads.
pub fn write_arrival_table<W: Write>(writer: W, table: &ArrivalTable) -> SimResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    for (round, pairs) in table {
        let mut row = Vec::with_capacity(1 + pairs.len() * 2);
        row.push(round.to_string());
        for (start, target) in pairs {
            row.push(start.to_string());
            row.push(target.to_string());
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn parse_error(line: u64, message: impl Into<String>) -> SimError {
    SimError::ArrivalParse {
        line,
        message: message.into(),
    }
}
