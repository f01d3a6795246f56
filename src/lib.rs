//! ticket-sweep — turns travel-purchase confirmation emails into
//! calendar events with the ticket document attached.
//!
//! The crate is the extraction/correlation core plus narrow async traits
//! for the platform collaborators (mail store, calendar, document
//! store). Callers inject implementations and invoke
//! [`TicketProcessor::run`] as a scheduled procedure; a processed-thread
//! label keeps repeated runs idempotent.

pub mod cities;
pub mod config;
pub mod error;
pub mod extract;
pub mod itinerary;
pub mod pipeline;
pub mod platform;

pub use config::SweepConfig;
pub use error::{Error, Result};
pub use pipeline::{SweepReport, TicketProcessor};
