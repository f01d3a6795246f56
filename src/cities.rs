//! City registry — the static table of places the sweep recognizes.
//!
//! Display names follow the "LOCALITY - REGION" convention the
//! confirmation emails print. The same route shows up with unstable
//! separators across templates and filenames ("TERESINA - PI",
//! "TERESINA-PI", en/em dashes), so every comparison goes through
//! [`normalize_city`]; display strings keep their original spelling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One recognized city: a short code plus the display name used in
/// message bodies and ticket filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityEntry {
    /// Short identifier, e.g. "THE".
    pub code: String,
    /// Canonical display name, e.g. "TERESINA - PI".
    pub name: String,
}

/// Immutable lookup table over the configured cities.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    entries: Vec<CityEntry>,
}

impl CityRegistry {
    pub fn new(entries: Vec<CityEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CityEntry] {
        &self.entries
    }

    /// Ordered (origin, destination) pairs, identity pairs excluded.
    /// Follows table order, origins outermost.
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (&CityEntry, &CityEntry)> {
        self.entries.iter().flat_map(move |origin| {
            self.entries
                .iter()
                .filter(move |destination| destination.name != origin.name)
                .map(move |destination| (origin, destination))
        })
    }

    /// Code of the city mentioned somewhere in `text`.
    ///
    /// Compares normalized forms, so "TERESINA-PI" still resolves.
    pub fn code_for(&self, text: &str) -> Option<&str> {
        let haystack = normalize_city(text);
        self.entries
            .iter()
            .find(|city| haystack.contains(&normalize_city(&city.name)))
            .map(|city| city.code.as_str())
    }
}

/// The locality segment of a display name: everything before the first
/// dash separator. "TERESINA - PI" → "TERESINA".
pub fn locality(name: &str) -> &str {
    name.split(['-', '–', '—']).next().unwrap_or(name).trim()
}

/// Canonical form of a city mention, for key comparison only.
///
/// Folds hyphen/en-dash/em-dash with any surrounding spacing to " - ",
/// collapses whitespace runs, trims, uppercases.
pub fn normalize_city(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut gap_has_dash = false;
    let mut gap_has_space = false;
    for ch in text.chars() {
        if matches!(ch, '-' | '–' | '—') {
            gap_has_dash = true;
        } else if ch.is_whitespace() {
            gap_has_space = true;
        } else {
            if !out.is_empty() {
                if gap_has_dash {
                    out.push_str(" - ");
                } else if gap_has_space {
                    out.push(' ');
                }
            }
            gap_has_dash = false;
            gap_has_space = false;
            out.extend(ch.to_uppercase());
        }
    }
    out
}

/// Normalized "origin|destination" key for attachment lookup.
///
/// Spacing and dash variants of the same route compare equal; two keys
/// built from a filename and from body text therefore collide exactly
/// when they name the same directed route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self(format!(
            "{}|{}",
            normalize_city(origin),
            normalize_city(destination)
        ))
    }

    /// The same route in the opposite direction.
    pub fn swapped(&self) -> Self {
        match self.0.split_once('|') {
            Some((origin, destination)) => Self(format!("{destination}|{origin}")),
            None => self.clone(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
