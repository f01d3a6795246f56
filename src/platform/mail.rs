//! Mail store interface — the slice of a mail platform the sweep
//! consumes: candidate search, thread labels, message bodies, and
//! attachments.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PlatformError;

/// Opaque label handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelId(pub String);

/// An attachment pulled out of a message: the filename plus an owned
/// copy of the bytes, renameable at storage time.
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub name: String,
    pub data: Vec<u8>,
}

/// Backend-agnostic mail store.
#[async_trait]
pub trait MailStore: Send + Sync {
    /// Run a platform query and return matching threads.
    async fn search(&self, query: &str) -> Result<Vec<Arc<dyn MailThread>>, PlatformError>;

    /// Resolve a label by name, creating it when absent.
    async fn get_or_create_label(&self, name: &str) -> Result<LabelId, PlatformError>;
}

/// One conversation thread.
#[async_trait]
pub trait MailThread: Send + Sync {
    /// Platform identifier, used in diagnostics.
    fn id(&self) -> String;

    async fn labels(&self) -> Result<Vec<LabelId>, PlatformError>;

    /// Messages in thread order.
    async fn messages(&self) -> Result<Vec<Arc<dyn MailMessage>>, PlatformError>;

    async fn add_label(&self, label: &LabelId) -> Result<(), PlatformError>;
}

/// One message within a thread.
#[async_trait]
pub trait MailMessage: Send + Sync {
    /// Platform identifier, used in diagnostics.
    fn id(&self) -> String;

    /// Full body text, markup included.
    async fn body(&self) -> Result<String, PlatformError>;

    async fn attachments(&self) -> Result<Vec<MailAttachment>, PlatformError>;
}
