//! # Peak Locator
//!
//! Resolves, for every concentration, the propagation time (seconds since
//! injection) at which the analyte peak is averaged. Manual mode takes one
//! propagation time per concentration and matches it to a sample of that
//! concentration's first run; programmatic mode takes the maximum of
//! the reference concentration's first run and applies it to every
//! concentration.

mod error;
mod locate;
mod model;
pub mod onset;


pub use error::PeakError;
pub use locate::{find_max_peak, locate_peaks, snap_to_sample};
pub use model::{PeakAssignment, PeakModel, PeakSource};
pub use onset::{background, detect_onset, Background, DEFAULT_ONSET_FACTOR};
