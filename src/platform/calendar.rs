//! Calendar interface — event insertion with popup reminders and an
//! optional ticket attachment.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Opaque calendar handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarId(pub String);

/// Identifier of an inserted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventId(pub String);

/// A stored document linked from an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttachment {
    pub file_id: String,
    pub url: String,
    pub title: String,
}

/// One event to insert. Times are wall-clock; timezone policy belongs
/// to the implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Popup reminder offsets, minutes before start.
    pub reminder_minutes: Vec<u32>,
    pub attachment: Option<EventAttachment>,
}

/// Backend-agnostic calendar.
#[async_trait]
pub trait Calendar: Send + Sync {
    /// Resolve a calendar by display name, creating it when absent.
    async fn get_or_create(&self, name: &str) -> Result<CalendarId, PlatformError>;

    async fn insert_event(
        &self,
        calendar: &CalendarId,
        event: &EventRequest,
    ) -> Result<EventId, PlatformError>;
}
