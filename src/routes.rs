use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_client_ip::InsecureClientIp;
use log::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Link, LinkFields, Message, NewLink};
use crate::server::SharedStore;

pub const LIVENESS_TEXT: &str = "Hello from the Bio-Link API!";

pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

pub async fn list_links(State(store): State<SharedStore>) -> Result<Json<Vec<Link>>, ApiError> {
    let links = store.find_all_ordered_by_creation_desc().await?;
    Ok(Json(links))
}

pub async fn create_link(
    State(store): State<SharedStore>,
    InsecureClientIp(ip): InsecureClientIp,
    payload: Result<Json<NewLink>, JsonRejection>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    let fields = parse_body(payload)?;
    let link = store.insert(&fields.title, &fields.url).await?;

    info!("{ip} created link {} -> {}", link.id, link.url);
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn update_link(
    State(store): State<SharedStore>,
    InsecureClientIp(ip): InsecureClientIp,
    Path(id): Path<String>,
    payload: Result<Json<NewLink>, JsonRejection>,
) -> Result<Json<Link>, ApiError> {
    let id = parse_id(&id)?;

    let fields = match parse_body(payload) {
        Ok(fields) => fields,
        Err(err) => {
            // unknown ids answer 404 whatever the body
            if store.find_by_id(id).await?.is_none() {
                debug!("update of unknown link {id}");
                return Err(ApiError::NotFound);
            }
            return Err(err);
        }
    };

    let Some(link) = store.update_by_id(id, &fields.title, &fields.url).await? else {
        debug!("update of unknown link {id}");
        return Err(ApiError::NotFound);
    };

    info!("{ip} updated link {} -> {}", link.id, link.url);
    Ok(Json(link))
}

pub async fn delete_link(
    State(store): State<SharedStore>,
    InsecureClientIp(ip): InsecureClientIp,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&id)?;

    if !store.delete_by_id(id).await? {
        debug!("delete of unknown link {id}");
        return Err(ApiError::NotFound);
    }

    info!("{ip} removed link {id}");
    Ok(Json(Message::new("Link removed")))
}

/// A path segment that is not a UUID can never name a stored link.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        debug!("malformed link id {raw:?}");
        ApiError::NotFound
    })
}

fn parse_body(payload: Result<Json<NewLink>, JsonRejection>) -> Result<LinkFields, ApiError> {
    let Json(payload) = payload.map_err(body_rejection)?;
    Ok(payload.into_fields()?)
}

/// Bad JSON is a validation failure; content-type and body-size problems
/// keep the status axum chose.
fn body_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            ApiError::Validation(rejection.body_text())
        }
        other => ApiError::Rejected {
            status: other.status(),
            msg: other.body_text(),
        },
    }
}
