//! Trip legs — correlation of extracted dates, routes, and tickets.

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use crate::extract::dates::DateExtractor;
use crate::extract::routes::RouteMention;
use crate::itinerary::attachments::AttachmentIndex;

/// One directional trip segment, ready for event emission. Transient:
/// built per message, dropped once its event is inserted.
#[derive(Debug, Clone)]
pub struct TripLeg<A> {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub origin: String,
    pub destination: String,
    /// Ticket covering this leg, when one was mapped.
    pub attachment: Option<A>,
    /// True when the body route was reversed relative to the ticket.
    pub swapped: bool,
}

/// Zip dates with routes positionally, up to the shorter length.
///
/// The two extractors scan the same body independently; the template
/// prints one date mention per route mention, so position is the join
/// key. An unparseable date drops that index only. Trailing unmatched
/// dates or routes are dropped.
pub fn correlate<A: Clone>(
    dates: &[String],
    routes: &[RouteMention],
    index: &AttachmentIndex<A>,
    extractor: &DateExtractor,
    trip_duration: Duration,
) -> Vec<TripLeg<A>> {
    let limit = dates.len().min(routes.len());
    if dates.len() != routes.len() {
        debug!(
            dates = dates.len(),
            routes = routes.len(),
            limit,
            "Date and route counts differ, correlating the shorter prefix"
        );
    }

    let mut legs = Vec::with_capacity(limit);
    for i in 0..limit {
        let Some(start) = extractor.parse(&dates[i]) else {
            warn!(index = i, raw = %dates[i], "Unparseable date mention, skipping leg");
            continue;
        };
        let resolved = index.resolve(&routes[i].origin, &routes[i].destination);
        if resolved.swapped {
            warn!(
                index = i,
                origin = %resolved.origin,
                destination = %resolved.destination,
                "Body route reversed relative to ticket, using ticket direction"
            );
        }
        legs.push(TripLeg {
            start,
            end: start + trip_duration,
            attachment: resolved.attachment.cloned(),
            origin: resolved.origin,
            destination: resolved.destination,
            swapped: resolved.swapped,
        });
    }
    legs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::{CityEntry, CityRegistry};
    use crate::extract::patterns::PatternSet;
    use chrono::NaiveDate;

    fn patterns() -> PatternSet {
        let registry = CityRegistry::new(vec![
            CityEntry { code: "THE".into(), name: "TERESINA - PI".into() },
            CityEntry { code: "PHB".into(), name: "PARNAIBA - PI".into() },
        ]);
        PatternSet::new(&registry, None).unwrap()
    }

    fn extractor() -> DateExtractor {
        DateExtractor::new().with_reference_year(2025)
    }

    fn route(origin: &str, destination: &str) -> RouteMention {
        RouteMention { origin: origin.into(), destination: destination.into() }
    }

    #[test]
    fn pairs_dates_and_routes_by_position() {
        let index = AttachmentIndex::build(
            vec![("TERESINA - PI - PARNAIBA - PI.pdf".to_string(), 1u32)],
            &patterns(),
        );
        let legs = correlate(
            &["16 de janeiro de 2025 às 13:11".to_string()],
            &[route("TERESINA - PI", "PARNAIBA - PI")],
            &index,
            &extractor(),
            Duration::hours(3),
        );
        assert_eq!(legs.len(), 1);
        let leg = &legs[0];
        assert_eq!(
            leg.start,
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap().and_hms_opt(13, 11, 0).unwrap(),
        );
        assert_eq!(leg.end, leg.start + Duration::hours(3));
        assert_eq!(leg.attachment, Some(1));
        assert!(!leg.swapped);
    }

    #[test]
    fn shorter_sequence_bounds_the_zip() {
        let index: AttachmentIndex<u32> = AttachmentIndex::build(vec![], &patterns());
        let legs = correlate(
            &[
                "16 de janeiro de 2025 às 13:11".to_string(),
                "18 de janeiro de 2025 às 08:00".to_string(),
            ],
            &[route("TERESINA - PI", "PARNAIBA - PI")],
            &index,
            &extractor(),
            Duration::hours(3),
        );
        assert_eq!(legs.len(), 1);
    }

    #[test]
    fn unparseable_date_skips_that_index_only() {
        let index: AttachmentIndex<u32> = AttachmentIndex::build(vec![], &patterns());
        let legs = correlate(
            &[
                "31 de fevereiro de 2025 às 13:11".to_string(),
                "18 de janeiro de 2025 às 08:00".to_string(),
            ],
            &[
                route("TERESINA - PI", "PARNAIBA - PI"),
                route("PARNAIBA - PI", "TERESINA - PI"),
            ],
            &index,
            &extractor(),
            Duration::hours(3),
        );
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].origin, "PARNAIBA - PI");
    }

    #[test]
    fn leg_without_ticket_is_still_produced() {
        let index: AttachmentIndex<u32> = AttachmentIndex::build(vec![], &patterns());
        let legs = correlate(
            &["16 de janeiro de 2025 às 13:11".to_string()],
            &[route("TERESINA - PI", "PARNAIBA - PI")],
            &index,
            &extractor(),
            Duration::hours(3),
        );
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].attachment, None);
    }

    #[test]
    fn reversed_ticket_swaps_the_leg_names() {
        let index = AttachmentIndex::build(
            vec![("PARNAIBA - PI - TERESINA - PI.pdf".to_string(), 9u32)],
            &patterns(),
        );
        let legs = correlate(
            &["16 de janeiro de 2025 às 13:11".to_string()],
            &[route("TERESINA - PI", "PARNAIBA - PI")],
            &index,
            &extractor(),
            Duration::hours(3),
        );
        assert_eq!(legs.len(), 1);
        assert!(legs[0].swapped);
        assert_eq!(legs[0].origin, "PARNAIBA - PI");
        assert_eq!(legs[0].destination, "TERESINA - PI");
        assert_eq!(legs[0].attachment, Some(9));
    }
}
