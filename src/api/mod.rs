pub mod admin;
pub mod health;
pub mod swagger;
pub mod users;

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::middleware::auth::{AuthMiddleware, Role};
use crate::services::auth_service::LoginRequest;
use crate::utils::AppError;

/// Route table shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
        )
        .into()
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/admin")
            .route("/signup", web::post().to(admin::signup))
            .route("/login", web::post().to(admin::login))
            .service(
                web::resource("/profile")
                    .wrap(AuthMiddleware::new(Role::Admin))
                    .route(web::get().to(admin::profile)),
            )
            .service(
                web::resource("/courses")
                    .wrap(AuthMiddleware::new(Role::Admin))
                    .route(web::post().to(admin::create_course))
                    .route(web::get().to(admin::list_courses)),
            )
            .service(
                web::resource("/courses/{course_id}")
                    .wrap(AuthMiddleware::new(Role::Admin))
                    .route(web::put().to(admin::update_course)),
            ),
    )
    .service(
        web::scope("/users")
            .route("/signup", web::post().to(users::signup))
            .route("/login", web::post().to(users::login))
            .service(
                web::resource("/courses")
                    .wrap(AuthMiddleware::new(Role::User))
                    .route(web::get().to(users::list_courses)),
            )
            .service(
                web::resource("/courses/{course_id}")
                    .wrap(AuthMiddleware::new(Role::User))
                    .route(web::post().to(users::purchase_course)),
            )
            .service(
                web::resource("/purchasedCourses")
                    .wrap(AuthMiddleware::new(Role::User))
                    .route(web::get().to(users::purchased_courses)),
            ),
    );
}

/// Login credentials travel in the `username` and `password` headers.
pub(crate) fn login_request(req: &HttpRequest) -> Result<LoginRequest, AppError> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(AppError::InvalidCredentials)
    };

    Ok(LoginRequest {
        username: header("username")?,
        password: header("password")?,
    })
}
