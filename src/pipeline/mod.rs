//! Sweep pipeline — per-thread iteration, the processed-label gate, and
//! event emission.

pub mod processor;

pub use processor::{SweepReport, TicketProcessor};
