//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn admin() -> User {
    User::new(
        UserId::new(VALID_ID).expect("fixture id"),
        Email::new("admin@healthspire.example").expect("fixture email"),
        Role::Admin,
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
#[case("Admin@Example.com", "admin@example.com")]
#[case("  editor@clinic.example\t", "editor@clinic.example")]
fn email_is_trimmed_and_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn email_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(
        Email::new(raw).expect_err("blank email"),
        UserValidationError::EmptyEmail
    );
}

#[rstest]
#[case("admin", Role::Admin, true)]
#[case("demo", Role::Demo, false)]
fn role_parses_and_reports_edit_rights(
    #[case] raw: &str,
    #[case] expected: Role,
    #[case] can_edit: bool,
) {
    let role: Role = raw.parse().expect("known role");
    assert_eq!(role, expected);
    assert_eq!(role.can_edit(), can_edit);
    assert_eq!(role.to_string(), raw);
}

#[rstest]
fn role_rejects_unknown_names() {
    let err = "guest".parse::<Role>().expect_err("unknown role");
    assert_eq!(err, UserValidationError::UnknownRole("guest".to_owned()));
}

#[rstest]
fn user_serialises_camel_case_with_avatar(admin: User) {
    let value = serde_json::to_value(admin.with_avatar("/uploads/a.png")).expect("serialise");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "email": "admin@healthspire.example",
            "role": "admin",
            "avatar": "/uploads/a.png",
        })
    );
}

#[rstest]
fn user_deserialisation_normalises_email_and_defaults_avatar() {
    let user: User = serde_json::from_value(json!({
        "id": VALID_ID,
        "email": "  Demo@Example.com ",
        "role": "demo",
    }))
    .expect("valid payload");

    assert_eq!(user.email().as_ref(), "demo@example.com");
    assert_eq!(user.role(), Role::Demo);
    assert_eq!(user.avatar(), "");
}

#[rstest]
fn account_debug_redacts_password_hash(admin: User) {
    let account = UserAccount::new(admin, "$argon2id$v=19$secret");
    let rendered = format!("{account:?}");
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("<redacted>"));
}
