//! Core pipeline for normalizing bike-share data into an operation log.
//!
//! This crate contains the fundamental types and logic for:
//! - Conversion: expanding trips into directional departure/arrival operations
//! - Synthesis: detecting gaps in a bike's trip chain and fabricating
//!   corrective operations that bisect the unexplained interval
//! - Status adaptation: turning station status snapshots into zero-effect
//!   operations
//! - Merging: one chronological sequence sorted by operation time
//!
//! All transformations are pure, synchronous and batch-oriented; loading
//! raw files is the CLI crate's concern.

pub mod convert;
pub mod merge;
pub mod op;
pub mod pipeline;
pub mod status;
pub mod synthesis;
pub mod trip;
pub mod types;

pub use convert::ops_from_trips;
pub use merge::merge_ops;
pub use op::{OpType, Operation, UnknownOpType};
pub use pipeline::build_op_log;
pub use status::{StationStatusSnapshot, ops_from_status};
pub use synthesis::{fill_missing_ops, synthesize_missing_ops};
pub use trip::Trip;
pub use types::{BikeId, StationId, ValidationError};
