//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! domain schemas they exchange, and the bearer-token security scheme. The
//! generated document is served by Swagger UI in debug builds and printed by
//! the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AboutData, AboutPatch, AboutSnapshot, Achievement, Blog, Client, CollectionKind,
    ContentSnapshot, Error, ErrorCode, Feature, LoginOutcome, Role, Specification, TeamMember,
    Testimonial, User, ValueItem,
};
use crate::inbound::http::health::Heartbeat;
use crate::inbound::http::uploads::{UploadForm, UploadResponse};
use crate::inbound::http::users::{ChangePasswordRequest, LoginRequest, UpdateProfileRequest};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token returned by POST /api/auth/login."))
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HealthSpire site API",
        description = "Public site content, admin editing, uploads, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::change_password,
        crate::inbound::http::content::snapshot,
        crate::inbound::http::content::blog_by_slug,
        crate::inbound::http::content::reset,
        crate::inbound::http::content::list,
        crate::inbound::http::content::create,
        crate::inbound::http::content::update,
        crate::inbound::http::content::remove,
        crate::inbound::http::about::get_about,
        crate::inbound::http::about::update_about,
        crate::inbound::http::uploads::upload,
        crate::inbound::http::health::heartbeat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        LoginOutcome,
        LoginRequest,
        UpdateProfileRequest,
        ChangePasswordRequest,
        CollectionKind,
        Specification,
        Feature,
        Achievement,
        ValueItem,
        TeamMember,
        Testimonial,
        Client,
        Blog,
        AboutData,
        AboutPatch,
        AboutSnapshot,
        ContentSnapshot,
        UploadForm,
        UploadResponse,
        Heartbeat,
    )),
    tags(
        (name = "auth", description = "Sign-in and self-service account operations"),
        (name = "content", description = "Site content collections and the about section"),
        (name = "uploads", description = "Image uploads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("User", "avatar")]
    #[case("LoginOutcome", "token")]
    #[case("AboutData", "ctaUrl")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");

        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/auth/login")]
    #[case("/api/{collection}/{id}")]
    #[case("/api/uploads")]
    #[case("/api/health")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
