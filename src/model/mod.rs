//! Data collected during a run.
//!
//! Everything here lives in memory for the duration of one run and is flattened into a
//! [`Frame`] before export.

pub mod frame;
pub mod types;

pub use frame::{Cell, Frame};
pub use types::{
    AthleteRef, FilterDimension, FilterRecord, FilterSet, LapTable, ATHLETE_COLUMN,
    FILTER_JOIN_KEY,
};
