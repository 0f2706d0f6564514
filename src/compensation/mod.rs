//! # Compensation
//!
//! Optional correction of raw detector signals for the instrument response.
//! A simulated reference profile is interpolated with a natural cubic spline
//! and used as a per-time weight on background-subtracted runs; every run is
//! then rescaled to the integrated signal of the reference concentration's
//! first run to remove gain drift between runs.
//!
//! Compensated data carries a persisted flag ([`COMPENSATION_MARKER`]) so
//! the correction is never applied twice.

mod compensator;
mod error;
mod profile;
mod record;
pub mod spline;

#[cfg(test)]
mod tests;

pub use compensator::{compensate, CompensatedData};
pub use error::CompensationError;
pub use profile::SimulatedProfile;
pub use record::{CompensationRecord, COMPENSATION_MARKER};
pub use spline::CubicSpline;
