//! Extraction engine — date/time mentions, route mentions, and the
//! compiled patterns both scans run on.

pub mod dates;
pub mod patterns;
pub mod routes;

pub use dates::DateExtractor;
pub use patterns::PatternSet;
pub use routes::{RouteMention, extract_routes};
