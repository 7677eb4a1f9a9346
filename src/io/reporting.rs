// src/io/reporting.rs

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::SimResult;
use crate::simulation::engine::RoundRecord;

/// Writes the per-round history to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The history records from the simulation engine.
pub fn write_round_log(file_path: &Path, data: &[RoundRecord]) -> SimResult<()> {
    let wtr = csv::Writer::from_path(file_path)?;
    write_records(wtr, data)?;

    info!(rows = data.len(), path = %file_path.display(), "exported round history");
    Ok(())
}

/// Like [`write_round_log`] but writes to any `Write` sink.
pub fn write_round_log_to<W: Write>(writer: W, data: &[RoundRecord]) -> SimResult<()> {
    write_records(csv::Writer::from_writer(writer), data)
}

fn write_records<W: Write>(mut wtr: csv::Writer<W>, data: &[RoundRecord]) -> SimResult<()> {
    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_one_row_per_round() {
        let records = vec![
            RoundRecord {
                round: 0,
                new_arrivals: 2,
                disembarked: 0,
                boarded: 1,
                waiting: 1,
                riding: 1,
                completed: 0,
                mean_fullness: 0.5,
                max_anger: 0,
            },
            RoundRecord {
                round: 1,
                new_arrivals: 0,
                disembarked: 1,
                boarded: 1,
                waiting: 0,
                riding: 1,
                completed: 1,
                mean_fullness: 0.5,
                max_anger: 0,
            },
        ];

        let mut buffer = Vec::new();
        write_round_log_to(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "round,new_arrivals,disembarked,boarded,waiting,riding,completed,mean_fullness,max_anger"
        );
        assert_eq!(lines[1], "0,2,0,1,1,1,0,0.5,0");
        assert_eq!(lines.len(), 3);
    }
}
