use axum::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LinkStore, StoreError};
use crate::models::{Link, LinkFields};

/// In-process store. Links are kept in insertion order, which breaks ties
/// between equal creation timestamps when listing.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: RwLock<Vec<Link>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(&self, title: &str, url: &str) -> Result<Link, StoreError> {
        let fields = LinkFields::parse(title, url)?;
        let mut links = self.links.write().await;
        let now = Utc::now();
        let link = Link {
            id: Uuid::new_v4(),
            title: fields.title,
            url: fields.url,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_all_ordered_by_creation_desc(&self) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self.links.read().await.iter().rev().cloned().collect();
        // stable: equal timestamps keep newest insertion first
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>, StoreError> {
        let links = self.links.read().await;
        Ok(links.iter().find(|link| link.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        title: &str,
        url: &str,
    ) -> Result<Option<Link>, StoreError> {
        let fields = LinkFields::parse(title, url)?;
        let mut links = self.links.write().await;

        let Some(link) = links.iter_mut().find(|link| link.id == id) else {
            return Ok(None);
        };
        link.title = fields.title;
        link.url = fields.url;
        link.updated_at = Utc::now().max(link.updated_at);
        Ok(Some(link.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut links = self.links.write().await;
        match links.iter().position(|link| link.id == id) {
            Some(index) => {
                links.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
