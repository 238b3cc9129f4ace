//! Persistence for [`Link`] records.
//!
//! The store owns id assignment and both timestamps. Callers only ever hand
//! it a title and url.

use axum::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{FieldError, Link};

mod memory;
mod postgres;

pub use memory::MemoryLinkStore;
pub use postgres::PgLinkStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid link: {0}")]
    Validation(#[from] FieldError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Validates, assigns an id and timestamps, and persists a new link.
    async fn insert(&self, title: &str, url: &str) -> Result<Link, StoreError>;

    /// All links, most recently created first.
    async fn find_all_ordered_by_creation_desc(&self) -> Result<Vec<Link>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>, StoreError>;

    /// Replaces title and url and refreshes `updated_at`. Returns `None` for
    /// an unknown id; never creates a record.
    async fn update_by_id(
        &self,
        id: Uuid,
        title: &str,
        url: &str,
    ) -> Result<Option<Link>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
