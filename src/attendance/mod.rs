//! Attendance session engine
//!
//! - `clock`: fixed-zone "now" and the civil date used to partition a day
//! - `session`: which check-in / checkout transitions are legal
//! - `duration`: first-check-in to last-check-out spans, per day and summed
//! - `status`: span to `Absent` / `HalfDay` / `Present`
//! - `engine`: the operations themselves, over an [`AttendanceStore`](crate::store::AttendanceStore)

pub mod clock;
pub mod duration;
pub mod engine;
pub mod error;
pub mod report;
pub mod session;
pub mod status;

pub use engine::AttendanceEngine;
pub use error::{AttendanceError, Operation, legacy_message};
