//! Route extraction — ordered (origin, destination) pairs from body text.

use crate::extract::patterns::PatternSet;

/// A route as printed in the message body, trimmed but otherwise
/// verbatim — normalization is for key comparison, never for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMention {
    pub origin: String,
    pub destination: String,
}

/// Every non-overlapping route match in document order.
///
/// Duplicate mentions are kept: the correlator pairs routes with dates
/// by position, and the body prints one route mention per date mention.
pub fn extract_routes(patterns: &PatternSet, text: &str) -> Vec<RouteMention> {
    patterns
        .route()
        .captures_iter(text)
        .map(|caps| RouteMention {
            origin: caps[1].trim().to_string(),
            destination: caps[2].trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::{CityEntry, CityRegistry};

    fn patterns(route_heading: Option<&str>) -> PatternSet {
        let registry = CityRegistry::new(vec![
            CityEntry { code: "THE".into(), name: "TERESINA - PI".into() },
            CityEntry { code: "PHB".into(), name: "PARNAIBA - PI".into() },
        ]);
        PatternSet::new(&registry, route_heading).unwrap()
    }

    #[test]
    fn extracts_pairs_in_document_order() {
        let patterns = patterns(Some(r"Viagem\s+de\s+(?:Ida|Volta)"));
        let body = "\
            Viagem de Ida<br>TERESINA - PI<td>06:00</td>PARNAIBA - PI\n\
            Viagem de Volta<br>PARNAIBA - PI<td>18:00</td>TERESINA - PI";
        let routes = extract_routes(&patterns, body);
        assert_eq!(
            routes,
            vec![
                RouteMention { origin: "TERESINA - PI".into(), destination: "PARNAIBA - PI".into() },
                RouteMention { origin: "PARNAIBA - PI".into(), destination: "TERESINA - PI".into() },
            ],
        );
    }

    #[test]
    fn duplicate_mentions_are_kept() {
        let patterns = patterns(None);
        let body = "resumo: TERESINA - PI > PARNAIBA - PI\ndetalhe: TERESINA - PI > PARNAIBA - PI";
        let routes = extract_routes(&patterns, body);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0], routes[1]);
    }

    #[test]
    fn no_mention_yields_empty() {
        let patterns = patterns(None);
        assert!(extract_routes(&patterns, "nenhuma rota aqui").is_empty());
    }

    #[test]
    fn rescanning_yields_identical_results() {
        let patterns = patterns(None);
        let body = "TERESINA - PI ... PARNAIBA - PI";
        assert_eq!(extract_routes(&patterns, body), extract_routes(&patterns, body));
    }
}
