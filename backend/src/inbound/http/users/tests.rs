//! Handler tests for the account endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{FixtureLoginService, MockAccountService};
use crate::domain::{Email, Role, UserId};
use crate::inbound::http::test_utils::{TestTokens, fixture_ports};

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(login)
                .service(current_user)
                .service(update_profile)
                .service(change_password),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn fixture_user() -> User {
    User::new(
        UserId::new(FixtureLoginService::USER_ID).expect("id"),
        Email::new(FixtureLoginService::EMAIL).expect("email"),
        Role::Admin,
    )
}

#[rstest]
#[actix_web::test]
async fn login_returns_token_and_user() {
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": FixtureLoginService::EMAIL,
            "password": FixtureLoginService::PASSWORD,
        }));

    let (status, body) = send(HttpState::new(fixture_ports()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], FixtureLoginService::TOKEN);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["email"], FixtureLoginService::EMAIL);
}

#[rstest]
#[case(json!({"email": "   ", "password": "pw"}), "email", "empty_email")]
#[case(json!({"email": "a@b.c", "password": ""}), "password", "empty_password")]
#[case(json!({"password": "pw"}), "email", "empty_email")]
#[actix_web::test]
async fn login_rejects_missing_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(payload);

    let (status, body) = send(HttpState::new(fixture_ports()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "email and password are required");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn login_with_wrong_password_is_unauthorised() {
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": FixtureLoginService::EMAIL, "password": "nope"}));

    let (status, body) = send(HttpState::new(fixture_ports()), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}

#[rstest]
#[actix_web::test]
async fn me_requires_a_token() {
    let request = actix_test::TestRequest::get().uri("/api/auth/me");

    let (status, body) = send(HttpState::new(fixture_ports()), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[case(Role::Admin)]
#[case(Role::Demo)]
#[actix_web::test]
async fn me_resolves_the_token_subject(#[case] role: Role) {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_me()
        .withf(|id| id.to_string() == FixtureLoginService::USER_ID)
        .times(1)
        .returning(|_| Ok(fixture_user()));
    let mut ports = fixture_ports();
    ports.accounts = Arc::new(accounts);
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", TestTokens::header(role)));

    let (status, body) = send(HttpState::new(ports), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], FixtureLoginService::USER_ID);
}

#[rstest]
#[actix_web::test]
async fn me_reports_deleted_accounts_as_not_found() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_me()
        .returning(|_| Err(Error::not_found("user not found")));
    let mut ports = fixture_ports();
    ports.accounts = Arc::new(accounts);
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", TestTokens::header(Role::Admin)));

    let (status, body) = send(HttpState::new(ports), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user not found");
}

#[rstest]
#[actix_web::test]
async fn demo_users_may_update_their_own_avatar() {
    let request = actix_test::TestRequest::patch()
        .uri("/api/auth/me")
        .insert_header(("Authorization", TestTokens::header(Role::Demo)))
        .set_json(json!({"avatar": "/uploads/me.png"}));

    let (status, body) = send(HttpState::new(fixture_ports()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avatar"], "/uploads/me.png");
}

#[rstest]
#[case("", "new-password-1", "currentPassword", "empty_password")]
#[case("old", "  ", "newPassword", "empty_password")]
#[case("old", "short", "newPassword", "password_too_short")]
#[actix_web::test]
async fn change_password_validates_the_request(
    #[case] current: &str,
    #[case] new: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut accounts = MockAccountService::new();
    accounts.expect_change_password().never();
    let mut ports = fixture_ports();
    ports.accounts = Arc::new(accounts);
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/change-password")
        .insert_header(("Authorization", TestTokens::header(Role::Admin)))
        .set_json(json!({"currentPassword": current, "newPassword": new}));

    let (status, body) = send(HttpState::new(ports), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case(Ok(()), StatusCode::NO_CONTENT)]
#[case(Err(Error::unauthorized("current password is incorrect")), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn change_password_reports_the_service_outcome(
    #[case] outcome: Result<(), Error>,
    #[case] status: StatusCode,
) {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_change_password()
        .withf(|_, change| change.current() == "old-password" && change.new_password() == "new-password-1")
        .times(1)
        .return_once(move |_, _| outcome);
    let mut ports = fixture_ports();
    ports.accounts = Arc::new(accounts);
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/change-password")
        .insert_header(("Authorization", TestTokens::header(Role::Admin)))
        .set_json(json!({"currentPassword": "old-password", "newPassword": "new-password-1"}));

    let (actual, body) = send(HttpState::new(ports), request).await;

    assert_eq!(actual, status);
    if status == StatusCode::UNAUTHORIZED {
        assert_eq!(body["code"], "unauthorized");
    }
}
