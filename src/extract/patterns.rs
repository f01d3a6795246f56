//! Pattern construction for city and route matching.
//!
//! City names arrive with unstable separators, and the span between the
//! two cities of a route is arbitrary content — plain adjacency in some
//! template versions, markup or a "Viagem de Ida/Volta" heading in
//! others. The heading fragment is therefore configurable rather than
//! baked in. Patterns compile once per sweep; every scan runs on a fresh
//! `captures_iter`, so repeated extraction calls never share cursor
//! state.

use regex::{Regex, RegexBuilder};

use crate::cities::CityRegistry;

/// Any dash character with optional surrounding whitespace.
const SEPARATOR: &str = r"\s*[-–—]\s*";

/// A per-pair filename pattern, kept with the display names it resolves
/// to.
#[derive(Debug)]
struct FilenamePattern {
    origin: String,
    destination: String,
    regex: Regex,
}

/// Compiled patterns for one sweep.
#[derive(Debug)]
pub struct PatternSet {
    route: Regex,
    filenames: Vec<FilenamePattern>,
}

impl PatternSet {
    /// Compile the route and filename patterns for the given registry.
    ///
    /// Fails only on a malformed `route_heading` fragment; city names are
    /// escaped before they enter any pattern.
    pub fn new(
        registry: &CityRegistry,
        route_heading: Option<&str>,
    ) -> Result<Self, regex::Error> {
        let cities = city_alternation(registry);
        let route_pattern = match route_heading {
            Some(heading) => format!("{heading}.*?{cities}.*?{cities}"),
            None => format!("{cities}.*?{cities}"),
        };
        let route = RegexBuilder::new(&route_pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;

        let filenames = registry
            .ordered_pairs()
            .map(|(origin, destination)| {
                let pattern = format!(
                    "{}{SEPARATOR}{}",
                    city_fragment(&origin.name),
                    city_fragment(&destination.name)
                );
                let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
                Ok(FilenamePattern {
                    origin: origin.name.clone(),
                    destination: destination.name.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { route, filenames })
    }

    /// The compiled route pattern, two city captures per match.
    ///
    /// `captures_iter` yields non-overlapping matches in document order,
    /// so "A ... B ... C" pairs A with B and resumes after B; C only
    /// appears in a pair if another city follows it.
    pub fn route(&self) -> &Regex {
        &self.route
    }

    /// Route encoded in an attachment filename: the first ordered city
    /// pair whose "origin - destination" pattern matches. Returns the
    /// registry display names.
    pub fn route_from_filename(&self, filename: &str) -> Option<(&str, &str)> {
        self.filenames
            .iter()
            .find(|pattern| pattern.regex.is_match(filename))
            .map(|pattern| (pattern.origin.as_str(), pattern.destination.as_str()))
    }
}

/// One city display name as a pattern fragment, separator variants
/// folded so "CITY - ST", "CITY-ST", and "CITY  —  ST" all match.
fn city_fragment(name: &str) -> String {
    name.split(['-', '–', '—'])
        .map(|segment| regex::escape(segment.trim()))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Alternation over every configured city, as a capture group.
fn city_alternation(registry: &CityRegistry) -> String {
    let alternatives: Vec<String> = registry
        .entries()
        .iter()
        .map(|city| city_fragment(&city.name))
        .collect();
    format!("({})", alternatives.join("|"))
}
