//! Content collection handlers.
//!
//! One set of handlers serves every collection; the `{collection}` path
//! segment is resolved to a [`CollectionKind`] and unknown names are 404s.
//! Reads are public. Writes require an admin token.
//!
//! ```text
//! GET    /api/content
//! GET    /api/blogs/slug/{slug}
//! GET    /api/{collection}
//! POST   /api/{collection}
//! PATCH  /api/{collection}/{id}   (PUT is accepted as an alias)
//! DELETE /api/{collection}/{id}
//! POST   /api/settings/reset
//! ```
//!
//! Register the fixed routes (and the about, upload, and health handlers)
//! ahead of the `{collection}` patterns so they are matched first.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde_json::Value;
use tracing::info;

use crate::domain::{CollectionKind, ContentSnapshot, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

fn collection(key: &str) -> ApiResult<CollectionKind> {
    CollectionKind::from_key(key)
        .ok_or_else(|| Error::not_found(format!("unknown collection: {key}")))
}

/// Full site content in one response.
#[utoipa::path(
    get,
    path = "/api/content",
    responses(
        (status = 200, description = "Content snapshot", body = ContentSnapshot),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["content"],
    operation_id = "contentSnapshot",
    security([])
)]
#[get("/content")]
pub async fn snapshot(state: web::Data<HttpState>) -> ApiResult<web::Json<ContentSnapshot>> {
    Ok(web::Json(state.content.snapshot().await?))
}

/// Look up one blog post by slug.
#[utoipa::path(
    get,
    path = "/api/blogs/slug/{slug}",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 200, description = "Blog post", body = Object),
        (status = 404, description = "No blog with that slug", body = Error)
    ),
    tags = ["content"],
    operation_id = "blogBySlug",
    security([])
)]
#[get("/blogs/slug/{slug}")]
pub async fn blog_by_slug(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    Ok(web::Json(state.content.blog_by_slug(&path).await?))
}

/// Replace all content with the packaged defaults.
#[utoipa::path(
    post,
    path = "/api/settings/reset",
    responses(
        (status = 204, description = "Content reset"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["content"],
    operation_id = "resetContent",
    security(("BearerToken" = []))
)]
#[post("/settings/reset")]
pub async fn reset(state: web::Data<HttpState>, admin: AdminUser) -> ApiResult<HttpResponse> {
    state.content_commands.reset().await?;
    info!(user_id = %admin.0.user_id, "content reset to defaults");
    Ok(HttpResponse::NoContent().finish())
}

/// List a collection in insertion order.
#[utoipa::path(
    get,
    path = "/api/{collection}",
    params(("collection" = CollectionKind, Path, description = "Collection name")),
    responses(
        (status = 200, description = "Records", body = [Object]),
        (status = 404, description = "Unknown collection", body = Error)
    ),
    tags = ["content"],
    operation_id = "listRecords",
    security([])
)]
#[get("/{collection}")]
pub async fn list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Value>>> {
    let kind = collection(&path)?;
    Ok(web::Json(state.content.list(kind).await?))
}

/// Create a record with a server-assigned id.
#[utoipa::path(
    post,
    path = "/api/{collection}",
    params(("collection" = CollectionKind, Path, description = "Collection name")),
    request_body = Object,
    responses(
        (status = 201, description = "Created record", body = Object),
        (status = 400, description = "Invalid record", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown collection", body = Error),
        (status = 409, description = "Blog slug already exists", body = Error)
    ),
    tags = ["content"],
    operation_id = "createRecord",
    security(("BearerToken" = []))
)]
#[post("/{collection}")]
pub async fn create(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let kind = collection(&path)?;
    let record = state
        .content_commands
        .create(kind, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Merge a patch over a stored record.
#[utoipa::path(
    patch,
    path = "/api/{collection}/{id}",
    params(
        ("collection" = CollectionKind, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 400, description = "Invalid record", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown collection or record", body = Error),
        (status = 409, description = "Blog slug already exists", body = Error)
    ),
    tags = ["content"],
    operation_id = "updateRecord",
    security(("BearerToken" = []))
)]
#[route("/{collection}/{id}", method = "PATCH", method = "PUT")]
pub async fn update(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<(String, String)>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Value>> {
    let (key, id) = path.into_inner();
    let kind = collection(&key)?;
    let record = state
        .content_commands
        .update(kind, &id, payload.into_inner())
        .await?;
    Ok(web::Json(record))
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/api/{collection}/{id}",
    params(
        ("collection" = CollectionKind, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown collection or record", body = Error)
    ),
    tags = ["content"],
    operation_id = "deleteRecord",
    security(("BearerToken" = []))
)]
#[delete("/{collection}/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (key, id) = path.into_inner();
    let kind = collection(&key)?;
    state.content_commands.delete(kind, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
