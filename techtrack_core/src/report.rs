//! The report builder: per-timestep distance rows and the accumulated
//! distance report.
//!
//! Row construction is a pure function of one timestep record; the report
//! is a single pass over the input, one row per record, in input order.

use crate::model::{PairKey, TimestepRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default proximity threshold: pairs at or under this distance are "close".
pub const PROXIMITY_THRESHOLD_FT: f64 = 1000.0;

/// Distance and proximity classification for one technician pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairDistance {
    /// Great-circle distance in feet
    pub feet: f64,

    /// Whether the pair is within the proximity threshold
    pub close: bool,
}

impl PairDistance {
    /// Classifies a distance against a threshold. The threshold is
    /// inclusive: exactly on the boundary counts as close.
    pub fn classify(feet: f64, threshold_ft: f64) -> Self {
        Self {
            feet,
            close: feet <= threshold_ft,
        }
    }

    /// The proximity flag in the report's 0/1 encoding.
    pub fn close_flag(&self) -> u8 {
        u8::from(self.close)
    }
}

/// One row of the distance report, derived from exactly one timestep.
///
/// Rows never reference each other: no running state, no smoothing, no
/// cross-timestep computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRow {
    /// Timestamp in seconds
    pub tsecs: f64,

    /// Timestamp in minutes (tsecs / 60, not rounded)
    pub tminutes: f64,

    /// Distance and flag for every unordered technician pair
    pub pairs: BTreeMap<PairKey, PairDistance>,
}

impl DistanceRow {
    /// Builds the row for one timestep record.
    ///
    /// Pure: same record and threshold always yield the same row.
    pub fn build(record: &TimestepRecord, threshold_ft: f64) -> Self {
        let mut pairs = BTreeMap::new();
        for (key, a, b) in record.pairs() {
            let feet = a.distance_feet(b);
            pairs.insert(key, PairDistance::classify(feet, threshold_ft));
        }

        Self {
            tsecs: record.tsecs,
            tminutes: record.tsecs / 60.0,
            pairs,
        }
    }

    /// Looks up the distance entry for a pair.
    pub fn pair(&self, key: PairKey) -> Option<&PairDistance> {
        self.pairs.get(&key)
    }
}

/// The full ordered report: one row per input timestep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    /// Rows in input order
    pub rows: Vec<DistanceRow>,
}

impl DistanceReport {
    /// Builds the report in a single pass over the ordered records.
    ///
    /// The output vector is pre-sized; rows land in input order, exactly
    /// one per record.
    pub fn build(records: &[TimestepRecord], threshold_ft: f64) -> Self {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(DistanceRow::build(record, threshold_ft));
        }
        Self { rows }
    }

    /// Number of rows in the report.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The set of pair keys the report covers, taken from the first row.
    pub fn pair_keys(&self) -> Vec<PairKey> {
        self.rows
            .first()
            .map(|row| row.pairs.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Renders the report as an aligned text table, mirroring the CSV
    /// column layout (leading 0-based index column included).
    pub fn render_table(&self) -> String {
        let keys = self.pair_keys();

        let mut header: Vec<String> = vec![String::new(), "tsecs".into(), "tminutes".into()];
        for key in &keys {
            header.push(format!("DistanceBetweenTech{key}(Ft)"));
        }
        for key in &keys {
            header.push(format!("IsTech{key}Close"));
        }

        let mut table: Vec<Vec<String>> = vec![header];
        for (index, row) in self.rows.iter().enumerate() {
            let mut cells: Vec<String> = vec![
                index.to_string(),
                row.tsecs.to_string(),
                row.tminutes.to_string(),
            ];
            for key in &keys {
                let feet = row.pair(*key).map(|p| p.feet).unwrap_or(f64::NAN);
                cells.push(format!("{feet:.2}"));
            }
            for key in &keys {
                let flag = row.pair(*key).map(|p| p.close_flag()).unwrap_or(0);
                cells.push(flag.to_string());
            }
            table.push(cells);
        }

        // Right-align each column to its widest cell, pandas-style.
        let columns = table[0].len();
        let widths: Vec<usize> = (0..columns)
            .map(|c| table.iter().map(|r| r[c].len()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for row in &table {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}
