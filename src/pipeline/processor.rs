//! Sweep processor — one scheduled pass over candidate threads.
//!
//! Flow:
//! 1. Resolve the processed label, calendar, and ticket folder
//! 2. Search candidate threads (subject + recency window)
//! 3. Skip threads that already carry the processed label
//! 4. Per message: extract dates and routes, index attachments, correlate
//! 5. Insert one event per leg; store and link the ticket when mapped
//! 6. Label the thread once at least one leg produced an event
//!
//! A labeled thread is never re-scanned. An unlabeled thread (no legs,
//! or every leg failed) is picked up again on the next scheduled run —
//! that label is the only durable state the sweep relies on. A crash
//! after some events but before the label means those events are
//! inserted again next run; there is no in-progress state between
//! unlabeled and labeled.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, error, info};

use crate::cities::{CityRegistry, locality};
use crate::config::SweepConfig;
use crate::error::{PlatformError, Result};
use crate::extract::{DateExtractor, PatternSet, extract_routes};
use crate::itinerary::{AttachmentIndex, TripLeg, correlate};
use crate::platform::calendar::{Calendar, CalendarId, EventAttachment, EventId, EventRequest};
use crate::platform::mail::{MailAttachment, MailMessage, MailStore, MailThread};
use crate::platform::storage::{DocumentStore, FolderId};

/// Summary of one sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Candidate threads returned by the search.
    pub threads: usize,
    /// Threads skipped because they already carry the processed label.
    pub skipped: usize,
    /// Events created in this run.
    pub events: usize,
    /// Platform failures that were logged and left for the next run.
    pub failures: usize,
}

/// Drives extraction, correlation, and event emission against the
/// injected platform collaborators.
pub struct TicketProcessor {
    mail: Arc<dyn MailStore>,
    calendar: Arc<dyn Calendar>,
    documents: Arc<dyn DocumentStore>,
    config: SweepConfig,
    registry: CityRegistry,
    patterns: PatternSet,
    dates: DateExtractor,
}

impl TicketProcessor {
    /// Validate the configuration and compile the pattern set.
    pub fn new(
        config: SweepConfig,
        mail: Arc<dyn MailStore>,
        calendar: Arc<dyn Calendar>,
        documents: Arc<dyn DocumentStore>,
    ) -> Result<Self> {
        config.validate()?;
        let registry = CityRegistry::new(config.cities.clone());
        let patterns = PatternSet::new(&registry, config.route_heading.as_deref())?;
        Ok(Self {
            mail,
            calendar,
            documents,
            config,
            registry,
            patterns,
            dates: DateExtractor::new(),
        })
    }

    /// Pin the year used for short-form date mentions (normally read
    /// from the local clock at parse time).
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.dates = self.dates.with_reference_year(year);
        self
    }

    /// Run one sweep.
    ///
    /// Per-thread, per-message, and per-leg platform failures are logged
    /// with their identifiers and counted, never propagated — the
    /// affected thread stays unlabeled and is retried next run. Only the
    /// initial label/calendar/folder resolution and the candidate search
    /// abort the whole run.
    pub async fn run(&self) -> Result<SweepReport> {
        let label = self
            .mail
            .get_or_create_label(&self.config.processed_label)
            .await?;
        let calendar = self.calendar.get_or_create(&self.config.calendar_name).await?;
        let folder = self
            .documents
            .get_or_create_folder(&self.config.ticket_folder)
            .await?;

        let query = self.config.query_string();
        let threads = self.mail.search(&query).await?;
        info!(count = threads.len(), query = %query, "Candidate threads found");

        let mut report = SweepReport { threads: threads.len(), ..Default::default() };

        for thread in threads {
            let thread_id = thread.id();
            match thread.labels().await {
                Ok(labels) if labels.contains(&label) => {
                    debug!(thread = %thread_id, "Thread already processed, skipping");
                    report.skipped += 1;
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    error!(thread = %thread_id, error = %e, "Failed to read thread labels");
                    report.failures += 1;
                    continue;
                }
            }

            match self
                .process_thread(thread.as_ref(), &calendar, &folder, &mut report)
                .await
            {
                Ok(created) if created > 0 => {
                    if let Err(e) = thread.add_label(&label).await {
                        // Next run re-scans this thread and may duplicate
                        // its events.
                        error!(thread = %thread_id, error = %e, "Failed to label processed thread");
                        report.failures += 1;
                    }
                }
                Ok(_) => {
                    debug!(thread = %thread_id, "No legs produced, thread left unlabeled");
                }
                Err(e) => {
                    error!(thread = %thread_id, error = %e, "Thread processing failed, left for next run");
                    report.failures += 1;
                }
            }
        }

        info!(
            events = report.events,
            skipped = report.skipped,
            failures = report.failures,
            "Sweep finished"
        );
        Ok(report)
    }

    /// Process every message in one thread. Returns the number of events
    /// created.
    async fn process_thread(
        &self,
        thread: &dyn MailThread,
        calendar: &CalendarId,
        folder: &FolderId,
        report: &mut SweepReport,
    ) -> std::result::Result<usize, PlatformError> {
        let thread_id = thread.id();
        let messages = thread.messages().await?;
        debug!(thread = %thread_id, messages = messages.len(), "Scanning thread");

        let mut created = 0;
        for message in messages {
            match self
                .process_message(&thread_id, message.as_ref(), calendar, folder, report)
                .await
            {
                Ok(count) => created += count,
                Err(e) => {
                    error!(
                        thread = %thread_id,
                        message = %message.id(),
                        error = %e,
                        "Message processing failed"
                    );
                    report.failures += 1;
                }
            }
        }
        Ok(created)
    }

    /// Extract, correlate, and emit events for one message. Returns the
    /// number of events created.
    async fn process_message(
        &self,
        thread_id: &str,
        message: &dyn MailMessage,
        calendar: &CalendarId,
        folder: &FolderId,
        report: &mut SweepReport,
    ) -> std::result::Result<usize, PlatformError> {
        let message_id = message.id();
        let body = message.body().await?;
        let dates = self.dates.extract(&body);
        let routes = extract_routes(&self.patterns, &body);
        debug!(
            thread = %thread_id,
            message = %message_id,
            dates = dates.len(),
            routes = routes.len(),
            "Extracted mentions"
        );

        if dates.is_empty() || routes.is_empty() {
            return Ok(0);
        }

        let attachments = message.attachments().await?;
        let index = AttachmentIndex::build(
            attachments.into_iter().map(|a| (a.name.clone(), a)),
            &self.patterns,
        );

        let legs = correlate(
            &dates,
            &routes,
            &index,
            &self.dates,
            Duration::hours(self.config.trip_duration_hours),
        );

        let mut created = 0;
        for (i, leg) in legs.into_iter().enumerate() {
            match self.emit_event(&leg, calendar, folder).await {
                Ok(event) => {
                    info!(
                        thread = %thread_id,
                        message = %message_id,
                        leg = i,
                        event = %event.0,
                        origin = %leg.origin,
                        destination = %leg.destination,
                        "Event created"
                    );
                    created += 1;
                    report.events += 1;
                }
                Err(e) => {
                    error!(
                        thread = %thread_id,
                        message = %message_id,
                        leg = i,
                        error = %e,
                        "Failed to create event for leg"
                    );
                    report.failures += 1;
                }
            }
        }
        Ok(created)
    }

    /// Store the ticket (when one was mapped) and insert the calendar
    /// event for one leg.
    async fn emit_event(
        &self,
        leg: &TripLeg<MailAttachment>,
        calendar: &CalendarId,
        folder: &FolderId,
    ) -> std::result::Result<EventId, PlatformError> {
        let attachment = match &leg.attachment {
            Some(ticket) => Some(self.store_ticket(ticket, leg, folder).await?),
            None => None,
        };

        let request = EventRequest {
            title: event_title(&leg.origin, &leg.destination),
            start: leg.start,
            end: leg.end,
            reminder_minutes: self.config.reminder_minutes(),
            attachment,
        };
        self.calendar.insert_event(calendar, &request).await
    }

    /// Rename and store one ticket, returning the link to attach to the
    /// event.
    async fn store_ticket(
        &self,
        ticket: &MailAttachment,
        leg: &TripLeg<MailAttachment>,
        folder: &FolderId,
    ) -> std::result::Result<EventAttachment, PlatformError> {
        let name = ticket_filename(
            &self.config.ticket_name_prefix,
            &self.registry,
            &leg.origin,
            &leg.destination,
            leg.start,
        );
        let stored = self.documents.store(folder, &name, &ticket.data).await?;
        let url = self.documents.share_readonly(&stored).await?;
        Ok(EventAttachment { file_id: stored.id, url, title: stored.name })
    }
}

/// Event title, locality segments only: "Viagem TERESINA : PARNAIBA".
fn event_title(origin: &str, destination: &str) -> String {
    format!("Viagem {} : {}", locality(origin), locality(destination))
}

/// Name the stored ticket after its route codes and departure time. A
/// city missing from the registry renders as "???" rather than failing
/// the upload.
fn ticket_filename(
    prefix: &str,
    registry: &CityRegistry,
    origin: &str,
    destination: &str,
    start: NaiveDateTime,
) -> String {
    let origin_code = registry.code_for(origin).unwrap_or("???");
    let destination_code = registry.code_for(destination).unwrap_or("???");
    format!(
        "{prefix} {origin_code}>{destination_code}-{}.pdf",
        start.format("%d/%m/%Y %H:%M"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CityEntry;
    use chrono::NaiveDate;

    fn registry() -> CityRegistry {
        CityRegistry::new(vec![
            CityEntry { code: "THE".into(), name: "TERESINA - PI".into() },
            CityEntry { code: "PHB".into(), name: "PARNAIBA - PI".into() },
        ])
    }

    #[test]
    fn event_title_uses_locality_segments() {
        assert_eq!(
            event_title("TERESINA - PI", "PARNAIBA - PI"),
            "Viagem TERESINA : PARNAIBA"
        );
        assert_eq!(event_title("TERESINA-PI", "PARNAIBA-PI"), "Viagem TERESINA : PARNAIBA");
    }

    #[test]
    fn ticket_filename_carries_codes_and_departure() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 16)
            .unwrap()
            .and_hms_opt(13, 11, 0)
            .unwrap();
        assert_eq!(
            ticket_filename(
                "Bilhete Guanabara",
                &registry(),
                "TERESINA - PI",
                "PARNAIBA - PI",
                start,
            ),
            "Bilhete Guanabara THE>PHB-16/01/2025 13:11.pdf"
        );
    }

    #[test]
    fn unknown_city_code_renders_placeholder() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 16)
            .unwrap()
            .and_hms_opt(13, 11, 0)
            .unwrap();
        let name = ticket_filename(
            "Bilhete Guanabara",
            &registry(),
            "FORTALEZA - CE",
            "PARNAIBA - PI",
            start,
        );
        assert_eq!(name, "Bilhete Guanabara ???>PHB-16/01/2025 13:11.pdf");
    }
}
