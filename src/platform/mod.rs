//! Narrow interfaces for the external collaborators. The sweep core
//! drives these sequentially; implementations own auth, transport, and
//! timezone policy.

pub mod calendar;
pub mod mail;
pub mod storage;

pub use calendar::{Calendar, CalendarId, EventAttachment, EventId, EventRequest};
pub use mail::{LabelId, MailAttachment, MailMessage, MailStore, MailThread};
pub use storage::{DocumentStore, FolderId, StoredFile};
