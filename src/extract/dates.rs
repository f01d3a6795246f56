//! Natural-language date/time extraction for the confirmation emails.
//!
//! Two styles appear across template versions:
//!
//! - long:  "16 de janeiro de 2025 às 13:11"
//! - short: "29 jul, terça 10:01" — weekday filler between month and time
//!
//! The short style carries no year; parsing fills in the current calendar
//! year at parse time. A trip parsed near year-end can therefore land in
//! the wrong year — the emails themselves are ambiguous, and the behavior
//! is kept as is.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Full month names, January first.
const MONTHS_FULL: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho",
    "agosto", "setembro", "outubro", "novembro", "dezembro",
];

/// Abbreviated month names, January first.
const MONTHS_SHORT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out",
    "nov", "dez",
];

/// At most this many filler characters may separate the short-form
/// day/month token from the time token.
const SHORT_FORM_FILLER_MAX: usize = 15;

/// Finds and parses date/time mentions in message bodies.
pub struct DateExtractor {
    scan: Regex,
    long: Regex,
    short: Regex,
    reference_year: Option<i32>,
}

impl DateExtractor {
    pub fn new() -> Self {
        let months_short = MONTHS_SHORT.join("|");
        let scan = format!(
            r"(?i)(?:\d{{1,2}}\s+de\s+\p{{L}}+\s+de\s+\d{{4}}\s+às\s+\d{{2}}:\d{{2}})|(?:\d{{1,2}}\s+(?:{months_short})[^0-9]{{1,{SHORT_FORM_FILLER_MAX}}}\d{{2}}:\d{{2}})"
        );
        let short = format!(
            r"(?i)(\d{{1,2}})\s+({months_short})[^0-9]*?(\d{{1,2}}):(\d{{2}})"
        );
        // Fixed patterns, cannot fail to compile.
        Self {
            scan: Regex::new(&scan).unwrap(),
            long: Regex::new(
                r"(?i)(\d{1,2})\s+de\s+(\p{L}+)\s+de\s+(\d{4})\s+às\s+(\d{1,2}):(\d{2})",
            )
            .unwrap(),
            short: Regex::new(&short).unwrap(),
            reference_year: None,
        }
    }

    /// Pin the year used for short-form mentions. Without this the year
    /// is read from the local clock at parse time.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Every date/time mention in `text`, in document order. Each call
    /// scans from the start; rescanning the same text yields the same
    /// matches.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.scan
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Resolve one raw mention into a timestamp. Long form carries its
    /// own year; short form uses the reference year. Anything that fails
    /// to resolve (unknown month, out-of-range day) yields `None`.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        if let Some(caps) = self.long.captures(raw) {
            let day: u32 = caps[1].parse().ok()?;
            let month = month_number(&caps[2], &MONTHS_FULL)?;
            let year: i32 = caps[3].parse().ok()?;
            let hour: u32 = caps[4].parse().ok()?;
            let minute: u32 = caps[5].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0);
        }
        if let Some(caps) = self.short.captures(raw) {
            let day: u32 = caps[1].parse().ok()?;
            let month = month_number(&caps[2], &MONTHS_SHORT)?;
            let year = self.reference_year.unwrap_or_else(|| Local::now().year());
            let hour: u32 = caps[3].parse().ok()?;
            let minute: u32 = caps[4].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0);
        }
        None
    }
}

fn month_number(name: &str, table: &[&str; 12]) -> Option<u32> {
    let name = name.to_lowercase();
    table
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DateExtractor {
        DateExtractor::new().with_reference_year(2025)
    }

    #[test]
    fn long_form_parses_all_fields() {
        let parsed = extractor().parse("16 de janeiro de 2025 às 13:11").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap().and_hms_opt(13, 11, 0).unwrap(),
        );
    }

    #[test]
    fn long_form_is_case_insensitive() {
        let parsed = extractor().parse("3 de MARÇO de 2024 às 07:45").unwrap();
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.year(), 2024);
    }

    #[test]
    fn short_form_uses_reference_year() {
        let parsed = extractor().parse("29 jul, terça 10:01").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2025, 7, 29).unwrap().and_hms_opt(10, 1, 0).unwrap(),
        );
    }

    #[test]
    fn unknown_month_yields_none() {
        assert_eq!(extractor().parse("16 de fevereirinho de 2025 às 13:11"), None);
        assert_eq!(extractor().parse("29 xyz, terça 10:01"), None);
    }

    #[test]
    fn out_of_range_day_yields_none() {
        assert_eq!(extractor().parse("31 de fevereiro de 2025 às 13:11"), None);
    }

    #[test]
    fn extract_finds_both_styles_in_document_order() {
        let body = "Ida: 29 jul, terça 10:01 ... Volta: 16 de janeiro de 2025 às 13:11";
        let found = extractor().extract(body);
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with("29 jul"));
        assert!(found[1].starts_with("16 de janeiro"));
    }

    #[test]
    fn extract_is_restartable() {
        let ex = extractor();
        let body = "saída 16 de janeiro de 2025 às 13:11, retorno 18 de janeiro de 2025 às 08:00";
        assert_eq!(ex.extract(body), ex.extract(body));
        assert_eq!(ex.extract(body).len(), 2);
    }

    #[test]
    fn short_form_filler_is_bounded() {
        let within = "29 jul, terça-feira 10:01";
        assert_eq!(extractor().extract(within).len(), 1);

        let beyond = format!("29 jul{}10:01", ", um texto muito comprido aqui ");
        assert!(extractor().extract(&beyond).is_empty());
    }

    #[test]
    fn every_month_resolves() {
        let ex = extractor();
        for (i, month) in MONTHS_FULL.iter().enumerate() {
            let raw = format!("10 de {month} de 2025 às 12:00");
            assert_eq!(ex.parse(&raw).unwrap().month(), i as u32 + 1, "{month}");
        }
        for (i, month) in MONTHS_SHORT.iter().enumerate() {
            let raw = format!("10 {month} seg 12:00");
            assert_eq!(ex.parse(&raw).unwrap().month(), i as u32 + 1, "{month}");
        }
    }
}
