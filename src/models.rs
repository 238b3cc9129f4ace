use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A titled external link as persisted by a [`crate::store::LinkStore`].
#[derive(Deserialize, Serialize, sqlx::FromRow, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update. Both fields are optional on the wire
/// so that a missing field is reported as a validation error rather than a
/// deserialization failure.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct NewLink {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl NewLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
        }
    }

    pub fn into_fields(self) -> Result<LinkFields, FieldError> {
        LinkFields::parse(
            self.title.as_deref().unwrap_or(""),
            self.url.as_deref().unwrap_or(""),
        )
    }
}

/// `{ "msg": ... }` body used for confirmations and client-facing errors.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub msg: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Title and url that passed presence validation, already trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkFields {
    pub title: String,
    pub url: String,
}

impl LinkFields {
    pub fn parse(title: &str, url: &str) -> Result<Self, FieldError> {
        Ok(Self {
            title: required("title", title)?,
            url: required("url", url)?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Missing(field));
    }
    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_both_fields() {
        let fields = LinkFields::parse("  Blog ", "\thttps://a.example\n").unwrap();
        assert_eq!(fields.title, "Blog");
        assert_eq!(fields.url, "https://a.example");
    }

    #[test]
    fn parse_rejects_blank_title_before_url() {
        assert_eq!(
            LinkFields::parse("   ", ""),
            Err(FieldError::Missing("title"))
        );
        assert_eq!(
            LinkFields::parse("Blog", " "),
            Err(FieldError::Missing("url"))
        );
    }

    #[test]
    fn missing_json_fields_are_validation_errors() {
        let payload: NewLink = serde_json::from_str(r#"{"url":"https://a.example"}"#).unwrap();
        assert_eq!(payload.into_fields(), Err(FieldError::Missing("title")));
    }

    #[test]
    fn url_is_not_checked_for_shape() {
        let fields = NewLink::new("Notes", "not a url").into_fields().unwrap();
        assert_eq!(fields.url, "not a url");
    }

    #[test]
    fn link_serializes_with_camel_case_timestamps() {
        let now = Utc::now();
        let link = Link {
            id: Uuid::new_v4(),
            title: "Blog".into(),
            url: "https://a.example".into(),
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&link).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["id"], link.id.to_string());
    }
}
