//! # Trace Store
//!
//! In-memory representation of every detector run of a titration, grouped
//! by protein concentration, plus the CSV table contract used to bring runs
//! in from the ingestion layer and to persist compensated data.

mod error;
mod store;
pub mod table;
mod types;


pub use error::TraceError;
pub use store::TraceStore;
pub use table::Dataset;
pub use types::{Concentration, ConcentrationSeries, Trace, DEFAULT_UNIT};
