//! Client side of the links API: an HTTP client plus the state behind the
//! public and admin pages.

use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Link, Message, NewLink};

pub mod admin;
pub mod prefs;
pub mod public;

pub use admin::{AdminView, Notice, NoticeLevel, RowEditor};
pub use prefs::Preferences;
pub use public::{NavItem, PublicView};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {msg}")]
    Status { status: u16, msg: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|status| status.as_u16()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LinkClient {
    http: reqwest::Client,
    base_url: String,
}

impl LinkClient {
    /// `base_url` is the API origin, e.g. `http://localhost:4000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn links_url(&self) -> String {
        format!("{}/api/links", self.base_url)
    }

    fn link_url(&self, id: Uuid) -> String {
        format!("{}/api/links/{id}", self.base_url)
    }

    pub async fn list(&self) -> Result<Vec<Link>, ClientError> {
        let response = self.http.get(self.links_url()).send().await?;
        decode(response).await
    }

    pub async fn create(&self, title: &str, url: &str) -> Result<Link, ClientError> {
        let response = self
            .http
            .post(self.links_url())
            .json(&NewLink::new(title, url))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update(&self, id: Uuid, title: &str, url: &str) -> Result<Link, ClientError> {
        let response = self
            .http
            .put(self.link_url(id))
            .json(&NewLink::new(title, url))
            .send()
            .await?;
        decode(response).await
    }

    /// Returns the server's confirmation message.
    pub async fn delete(&self, id: Uuid) -> Result<String, ClientError> {
        let response = self.http.delete(self.link_url(id)).send().await?;
        let message: Message = decode(response).await?;
        Ok(message.msg)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await?;
    let msg = match serde_json::from_str::<Message>(&body) {
        Ok(message) => message.msg,
        Err(_) => body,
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        msg,
    })
}
