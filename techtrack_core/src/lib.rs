//! techtrack_core - Pairwise Proximity Reporting for Field Technicians
//!
//! Builds a per-timestep distance report from a GPS time series:
//! 1. **Load**: parse the upstream GeoJSON-shaped document into timestep records
//! 2. **Build**: compute pairwise haversine distances (feet) and proximity flags
//! 3. **Write**: emit the fixed-schema CSV report

pub mod error;
pub mod geometry;
pub mod input;
pub mod model;
pub mod output;
pub mod report;

// Re-export key types for convenience
pub use error::ReportError;
pub use geometry::Position;
pub use input::load_timesteps;
pub use model::{PairKey, TechId, TimestepRecord};
pub use output::write_csv;
pub use report::{DistanceReport, DistanceRow, PairDistance, PROXIMITY_THRESHOLD_FT};
