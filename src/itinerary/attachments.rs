//! Attachment routing — maps ticket files to the leg they cover.
//!
//! The filename is the ground truth for direction: confirmation emails
//! occasionally print a return leg's route reversed relative to its
//! attachment. Lookup therefore falls back to the swapped key and
//! reports the swap so the caller can correct the leg's display names.

use std::collections::HashMap;

use tracing::debug;

use crate::cities::RouteKey;
use crate::extract::patterns::PatternSet;

/// Per-message index from normalized route to attachment handle.
/// Rebuilt for every message, discarded after.
#[derive(Debug)]
pub struct AttachmentIndex<A> {
    by_route: HashMap<RouteKey, A>,
}

/// Outcome of an attachment lookup for one leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResolution<'a, A> {
    /// The ticket covering this leg, when one was mapped.
    pub attachment: Option<&'a A>,
    /// Origin after any swap correction.
    pub origin: String,
    /// Destination after any swap correction.
    pub destination: String,
    /// True when only the reversed key matched and the names were
    /// swapped to what the ticket actually covers.
    pub swapped: bool,
}

impl<A> AttachmentIndex<A> {
    /// Index attachments by the route their filename encodes.
    ///
    /// Attachments whose name encodes no known route are skipped. When
    /// two filenames encode the same route the later one wins.
    pub fn build(
        attachments: impl IntoIterator<Item = (String, A)>,
        patterns: &PatternSet,
    ) -> Self {
        let mut by_route = HashMap::new();
        for (name, handle) in attachments {
            match patterns.route_from_filename(&name) {
                Some((origin, destination)) => {
                    let key = RouteKey::new(origin, destination);
                    debug!(attachment = %name, route = %key, "Mapped ticket attachment");
                    by_route.insert(key, handle);
                }
                None => {
                    debug!(attachment = %name, "Attachment name encodes no known route");
                }
            }
        }
        Self { by_route }
    }

    pub fn is_empty(&self) -> bool {
        self.by_route.is_empty()
    }

    /// Look up the ticket for a route extracted from body text: forward
    /// key first, then the swapped key. A miss returns no attachment and
    /// the names unchanged — the leg still becomes an event.
    pub fn resolve(&self, origin: &str, destination: &str) -> RouteResolution<'_, A> {
        let key = RouteKey::new(origin, destination);
        if let Some(attachment) = self.by_route.get(&key) {
            return RouteResolution {
                attachment: Some(attachment),
                origin: origin.to_string(),
                destination: destination.to_string(),
                swapped: false,
            };
        }
        if let Some(attachment) = self.by_route.get(&key.swapped()) {
            return RouteResolution {
                attachment: Some(attachment),
                origin: destination.to_string(),
                destination: origin.to_string(),
                swapped: true,
            };
        }
        RouteResolution {
            attachment: None,
            origin: origin.to_string(),
            destination: destination.to_string(),
            swapped: false,
        }
    }
}
