use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::login_request;
use crate::middleware::auth::{Claims, Role};
use crate::models::CourseResponse;
use crate::services::auth_service::{self, AuthResponse, SignupRequest};
use crate::services::course_service;
use crate::state::AppState;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/users/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created", body = AuthResponse),
        (status = 403, description = "User already exists")
    )
)]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    log::info!("📝 POST /users/signup - username: {}", request.username);

    let username = request.username.clone();
    match auth_service::signup(&state, Role::User, request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            log::warn!("❌ User signup failed: {} - {}", username, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    params(
        ("username" = String, Header, description = "Username"),
        ("password" = String, Header, description = "Password")
    ),
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 403, description = "Invalid username or password")
    )
)]
pub async fn login(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let request = login_request(&req)?;
    log::info!("🔐 POST /users/login - username: {}", request.username);

    let username = request.username.clone();
    match auth_service::login(&state, Role::User, request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            log::warn!("❌ User login failed: {} - {}", username, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/users/courses",
    tag = "Users",
    responses(
        (status = 200, description = "Published courses", body = Vec<CourseResponse>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid, expired or non-user token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_courses(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let courses = course_service::list_courses(state.store.as_ref(), true).await?;
    log::info!("📚 GET /users/courses - {} published course(s) for {}", courses.len(), user.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "courses": courses })))
}

#[utoipa::path(
    post,
    path = "/users/courses/{course_id}",
    tag = "Users",
    params(("course_id" = String, Path, description = "Course id (24 hex chars)")),
    responses(
        (status = 200, description = "Course purchased"),
        (status = 404, description = "Course not found"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or unknown user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn purchase_course(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("🛒 POST /users/courses/{} - {}", course_id, user.username);

    course_service::purchase_course(state.store.as_ref(), &user.username, &course_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Course purchased successfully" })))
}

#[utoipa::path(
    get,
    path = "/users/purchasedCourses",
    tag = "Users",
    responses(
        (status = 200, description = "Purchased courses in purchase order", body = Vec<CourseResponse>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or unknown user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn purchased_courses(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let courses = match course_service::purchased_courses(state.store.as_ref(), &user.username).await {
        Ok(courses) => courses,
        Err(e) => {
            log::warn!("❌ Purchased courses lookup failed: {} - {}", user.username, e);
            return Err(e);
        }
    };
    log::info!("🎓 GET /users/purchasedCourses - {} course(s) for {}", courses.len(), user.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "purchasedCourses": courses })))
}
