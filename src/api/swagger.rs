use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Market API",
        version = "1.0.0",
        description = "Administrators publish courses, learners browse and buy them.\n\n**Authentication:** protected endpoints take `Authorization: Bearer <token>`. Tokens come from the signup and login endpoints of each role and expire after one hour."
    ),
    paths(
        // Admin
        crate::api::admin::profile,
        crate::api::admin::signup,
        crate::api::admin::login,
        crate::api::admin::create_course,
        crate::api::admin::update_course,
        crate::api::admin::list_courses,

        // Users
        crate::api::users::signup,
        crate::api::users::login,
        crate::api::users::list_courses,
        crate::api::users::purchase_course,
        crate::api::users::purchased_courses,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::SignupRequest,
            crate::services::auth_service::AuthResponse,
            crate::models::CreateCourseRequest,
            crate::models::UpdateCourseRequest,
            crate::models::CourseResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Admin", description = "Administrator accounts and course management."),
        (name = "Users", description = "Learner accounts, course catalogue and purchases."),
        (name = "Health", description = "Liveness check."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by signup or login"))
                        .build()
                ),
            );
        }
    }
}
