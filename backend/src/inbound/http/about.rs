//! About-section singleton handlers.

use actix_web::{get, patch, web};

use crate::domain::{AboutData, AboutPatch, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// Fetch the about document. Fields never written are empty strings.
#[utoipa::path(
    get,
    path = "/api/about",
    responses(
        (status = 200, description = "About document", body = AboutData),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["content"],
    operation_id = "getAbout",
    security([])
)]
#[get("/about")]
pub async fn get_about(state: web::Data<HttpState>) -> ApiResult<web::Json<AboutData>> {
    Ok(web::Json(state.content.about().await?))
}

/// Merge heading, subheading, and call-to-action fields into the about document.
#[utoipa::path(
    patch,
    path = "/api/about",
    request_body = AboutPatch,
    responses(
        (status = 200, description = "Updated about document", body = AboutData),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["content"],
    operation_id = "updateAbout",
    security(("BearerToken" = []))
)]
#[patch("/about")]
pub async fn update_about(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    payload: web::Json<AboutPatch>,
) -> ApiResult<web::Json<AboutData>> {
    let about = state
        .content_commands
        .update_about(payload.into_inner())
        .await?;
    Ok(web::Json(about))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::inbound::http::test_utils::{TestTokens, fixture_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn call(request: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .service(web::scope("/api").service(get_about).service(update_about)),
        )
        .await;
        let res = test::call_service(&app, request.to_request()).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn unwritten_about_is_empty_strings() {
        let (status, body) = call(test::TestRequest::get().uri("/api/about")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"heading": "", "subheading": "", "ctaText": "", "ctaUrl": ""})
        );
    }

    #[rstest]
    #[case(Role::Admin, StatusCode::OK)]
    #[case(Role::Demo, StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn only_admins_update_about(#[case] role: Role, #[case] status: StatusCode) {
        let (actual, body) = call(
            test::TestRequest::patch()
                .uri("/api/about")
                .insert_header(("Authorization", TestTokens::header(role)))
                .set_json(json!({"ctaText": "Book a demo"})),
        )
        .await;

        assert_eq!(actual, status);
        if status == StatusCode::OK {
            assert_eq!(body["ctaText"], "Book a demo");
            assert_eq!(body["heading"], "");
        }
    }
}
