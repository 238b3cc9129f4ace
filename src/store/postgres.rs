use axum::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, query_as, Executor, PgPool};
use uuid::Uuid;

use super::{LinkStore, StoreError};
use crate::models::{Link, LinkFields};

pub struct PgLinkStore {
    pool: PgPool,
}

impl PgLinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `links` table and its index if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        self.pool
            .execute(include_str!("../../sql/schema.sql"))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert(&self, title: &str, url: &str) -> Result<Link, StoreError> {
        let fields = LinkFields::parse(title, url)?;
        let link = query_as::<_, Link>(
            r#"insert into links (title, url, created_at, updated_at)
            select $1, $2, t.now, t.now from (select clock_timestamp() as now) t
            returning id, title, url, created_at, updated_at;"#,
        )
        .bind(&fields.title)
        .bind(&fields.url)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    async fn find_all_ordered_by_creation_desc(&self) -> Result<Vec<Link>, StoreError> {
        let links = query_as::<_, Link>(
            r#"select id, title, url, created_at, updated_at from links
            order by created_at desc, seq desc;"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>, StoreError> {
        let link = query_as::<_, Link>(
            r#"select id, title, url, created_at, updated_at from links where id = $1;"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        title: &str,
        url: &str,
    ) -> Result<Option<Link>, StoreError> {
        let fields = LinkFields::parse(title, url)?;
        let link = query_as::<_, Link>(
            r#"update links
            set title = $2, url = $3, updated_at = greatest(clock_timestamp(), updated_at)
            where id = $1
            returning id, title, url, created_at, updated_at;"#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = query(r#"delete from links where id = $1;"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
