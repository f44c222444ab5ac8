//! CSV writer for the distance report.
//!
//! The on-disk schema is the legacy three-technician layout: a leading
//! unnamed 0-based index column, then
//! `tsecs, tminutes, DistanceBetweenTech1_2(Ft), DistanceBetweenTech1_3(Ft),
//! DistanceBetweenTech2_3(Ft), IsTech1_2Close, IsTech1_3Close,
//! IsTech2_3Close`. Distances and timestamps keep full float precision;
//! proximity flags are written as 0/1 integers.

use crate::error::ReportError;
use crate::model::{PairKey, TechId};
use crate::report::DistanceReport;
use std::fs::File;
use std::io;
use std::path::Path;

/// The three pairs the legacy schema covers, in column order.
fn legacy_pairs() -> [PairKey; 3] {
    [
        PairKey::new(TechId(1), TechId(2)),
        PairKey::new(TechId(1), TechId(3)),
        PairKey::new(TechId(2), TechId(3)),
    ]
}

/// Checks that every row covers exactly the legacy technician pairs.
fn check_roster(report: &DistanceReport) -> Result<(), ReportError> {
    let expected = legacy_pairs();
    for (index, row) in report.rows.iter().enumerate() {
        let keys: Vec<PairKey> = row.pairs.keys().copied().collect();
        if keys != expected {
            return Err(ReportError::UnexpectedRoster {
                reason: format!(
                    "row {index} covers pairs [{}], the report schema needs [1_2, 1_3, 2_3]",
                    keys.iter()
                        .map(|k| k.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }
    }
    Ok(())
}

/// Serializes the report to any writer in the legacy CSV layout.
pub fn write_report<W: io::Write>(report: &DistanceReport, writer: W) -> Result<(), io::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    let pairs = legacy_pairs();

    let mut header: Vec<String> = vec![String::new(), "tsecs".into(), "tminutes".into()];
    for key in &pairs {
        header.push(format!("DistanceBetweenTech{key}(Ft)"));
    }
    for key in &pairs {
        header.push(format!("IsTech{key}Close"));
    }
    csv.write_record(&header).map_err(io::Error::other)?;

    for (index, row) in report.rows.iter().enumerate() {
        let mut record: Vec<String> = vec![
            index.to_string(),
            row.tsecs.to_string(),
            row.tminutes.to_string(),
        ];
        for key in &pairs {
            // check_roster guarantees every legacy pair is present
            let pair = row.pair(*key).ok_or_else(|| {
                io::Error::other(format!("row {index} is missing pair {key}"))
            })?;
            record.push(pair.feet.to_string());
        }
        for key in &pairs {
            let pair = row.pair(*key).ok_or_else(|| {
                io::Error::other(format!("row {index} is missing pair {key}"))
            })?;
            record.push(pair.close_flag().to_string());
        }
        csv.write_record(&record).map_err(io::Error::other)?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes the report to a CSV file at `path`.
pub fn write_csv(report: &DistanceReport, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let path = path.as_ref();
    check_roster(report)?;

    let file = File::create(path).map_err(|source| ReportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_report(report, file).map_err(|source| ReportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
