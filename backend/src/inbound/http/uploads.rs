//! Image upload handler.
//!
//! Accepts `multipart/form-data` with a single `file` field and stores the
//! bytes through the [`UploadStore`] port. Other fields are drained and
//! ignored, though their bytes count towards the request's size cap.
//!
//! [`UploadStore`]: crate::domain::ports::UploadStore

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

const FILE_FIELD: &str = "file";

/// Default cap on an uploaded file, in bytes.
pub const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Largest accepted upload, registered as app data by the server.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

impl Default for UploadLimit {
    fn default() -> Self {
        Self(DEFAULT_UPLOAD_LIMIT)
    }
}

/// Body of a successful upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Public path serving the stored bytes.
    #[schema(example = "/uploads/3f1c2a9e8b7d4c5fa1e2d3c4b5a69788.png")]
    pub url: String,
}

/// Multipart body accepted by `POST /api/uploads`.
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

fn malformed(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

/// Running byte count across every field of one request.
struct BodyBudget {
    limit: usize,
    consumed: usize,
}

impl BodyBudget {
    fn new(limit: usize) -> Self {
        Self { limit, consumed: 0 }
    }

    fn charge(&mut self, len: usize) -> ApiResult<()> {
        self.consumed = self.consumed.saturating_add(len);
        if self.consumed > self.limit {
            return Err(Error::invalid_request("upload is too large")
                .with_details(json!({ "code": "body_too_large", "limit": self.limit })));
        }
        Ok(())
    }
}

async fn read_field(field: &mut Field, budget: &mut BodyBudget) -> ApiResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.charge(chunk.len())?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn drain_field(field: &mut Field, budget: &mut BodyBudget) -> ApiResult<()> {
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.charge(chunk.len())?;
    }
    Ok(())
}

/// Store an uploaded image and return its public URL.
#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Stored upload", body = UploadResponse),
        (status = 400, description = "Missing file field or malformed body", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadImage",
    security(("BearerToken" = []))
)]
#[post("/uploads")]
pub async fn upload(
    state: web::Data<HttpState>,
    admin: AdminUser,
    limit: Option<web::Data<UploadLimit>>,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut budget = BodyBudget::new(limit.map_or(DEFAULT_UPLOAD_LIMIT, |data| data.0));
    let mut stored = None;
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        if stored.is_some() || field.name() != Some(FILE_FIELD) {
            drain_field(&mut field, &mut budget).await?;
            continue;
        }
        let original_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or_default()
            .to_owned();
        let bytes = read_field(&mut field, &mut budget).await?;
        stored = Some((original_name, bytes));
    }

    let (original_name, bytes) = stored.ok_or_else(|| {
        Error::invalid_request("file field is required")
            .with_details(json!({ "field": FILE_FIELD, "code": "missing_file" }))
    })?;
    let url = state
        .uploads
        .save(&original_name, &bytes)
        .await
        .map_err(|err| {
            error!(error = %err, "upload could not be stored");
            Error::internal(err.to_string())
        })?;
    info!(
        user_id = %admin.0.user_id,
        url = %url,
        size = bytes.len(),
        "stored upload"
    );
    Ok(HttpResponse::Created().json(UploadResponse { url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::domain::ports::{MockUploadStore, UploadStoreError};
    use crate::inbound::http::test_utils::{TestTokens, fixture_ports};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    const BOUNDARY: &str = "healthspire-boundary";

    fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn two_field_body(first: (&str, &[u8]), second: (&str, &[u8])) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, bytes) in [first, second] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                     filename=\"{field}.png\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn call(
        store: MockUploadStore,
        role: Role,
        limit: usize,
        body: Vec<u8>,
    ) -> (StatusCode, Value) {
        let mut ports = fixture_ports();
        ports.uploads = Arc::new(store);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(ports)))
                .app_data(web::Data::new(UploadLimit(limit)))
                .service(web::scope("/api").service(upload)),
        )
        .await;
        let request = test::TestRequest::post()
            .uri("/api/uploads")
            .insert_header(("Authorization", TestTokens::header(role)))
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, request).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn stores_the_file_field_and_returns_201() {
        let mut store = MockUploadStore::new();
        store
            .expect_save()
            .withf(|name, bytes| name == "Team Photo.PNG" && bytes == b"png-bytes")
            .times(1)
            .return_once(|_, _| Ok("/uploads/abc.png".to_owned()));

        let (status, body) = call(
            store,
            Role::Admin,
            DEFAULT_UPLOAD_LIMIT,
            multipart_body("file", "Team Photo.PNG", b"png-bytes"),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["url"], "/uploads/abc.png");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_file_field_is_a_bad_request() {
        let mut store = MockUploadStore::new();
        store.expect_save().never();

        let (status, body) = call(
            store,
            Role::Admin,
            DEFAULT_UPLOAD_LIMIT,
            multipart_body("avatar", "me.png", b"bytes"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "missing_file");
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_files_are_rejected() {
        let mut store = MockUploadStore::new();
        store.expect_save().never();

        let (status, body) = call(
            store,
            Role::Admin,
            4,
            multipart_body("file", "big.png", b"more than four bytes"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "body_too_large");
    }

    #[rstest]
    #[case("junk", "file")]
    #[case("file", "junk")]
    #[actix_web::test]
    async fn cap_applies_to_all_fields_combined(#[case] first: &str, #[case] second: &str) {
        let mut store = MockUploadStore::new();
        store.expect_save().never();
        let chunk = [b'x'; 12];

        let (status, body) = call(
            store,
            Role::Admin,
            16,
            two_field_body((first, &chunk[..]), (second, &chunk[..])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "body_too_large");
    }

    #[rstest]
    #[actix_web::test]
    async fn extra_fields_within_the_cap_are_ignored() {
        let mut store = MockUploadStore::new();
        store
            .expect_save()
            .withf(|_, bytes| bytes == b"png")
            .times(1)
            .return_once(|_, _| Ok("/uploads/ok.png".to_owned()));

        let (status, _) = call(
            store,
            Role::Admin,
            16,
            two_field_body(("junk", &b"abc"[..]), ("file", &b"png"[..])),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn demo_users_cannot_upload() {
        let mut store = MockUploadStore::new();
        store.expect_save().never();

        let (status, _) = call(
            store,
            Role::Demo,
            DEFAULT_UPLOAD_LIMIT,
            multipart_body("file", "x.png", b"x"),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_failures_are_redacted_internal_errors() {
        let mut store = MockUploadStore::new();
        store
            .expect_save()
            .return_once(|_, _| Err(UploadStoreError::write("disk full at /srv/uploads")));

        let (status, body) = call(
            store,
            Role::Admin,
            DEFAULT_UPLOAD_LIMIT,
            multipart_body("file", "x.png", b"x"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }
}
