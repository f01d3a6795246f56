//! Document store interface — ticket files are renamed, stored in one
//! folder, and shared read-only so events can link to them.

use async_trait::async_trait;

use crate::error::PlatformError;

/// Opaque folder handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderId(pub String);

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
}

/// Backend-agnostic document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Resolve a folder by name, creating it when absent.
    async fn get_or_create_folder(&self, name: &str) -> Result<FolderId, PlatformError>;

    /// Store `data` under `name` inside `folder`.
    async fn store(
        &self,
        folder: &FolderId,
        name: &str,
        data: &[u8],
    ) -> Result<StoredFile, PlatformError>;

    /// Make a stored file readable by anyone with the link; returns the
    /// shareable URL.
    async fn share_readonly(&self, file: &StoredFile) -> Result<String, PlatformError>;
}
