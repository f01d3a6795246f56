//! Correlation — matching extracted dates and routes to ticket
//! attachments, producing trip legs ready for event emission.

pub mod attachments;
pub mod legs;

pub use attachments::{AttachmentIndex, RouteResolution};
pub use legs::{TripLeg, correlate};
