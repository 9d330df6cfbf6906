//! Run orchestration
//!
//! Ties the snapshot store, the console shell and process control together
//! into a single interactive run.

pub mod session;

pub use session::{Outcome, Session};
