use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::login_request;
use crate::middleware::auth::{Claims, Role};
use crate::models::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::services::auth_service::{self, AuthResponse, SignupRequest};
use crate::services::course_service;
use crate::state::AppState;
use crate::utils::AppError;

#[utoipa::path(
    get,
    path = "/admin/profile",
    tag = "Admin",
    responses(
        (status = 200, description = "Username of the calling administrator"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid, expired or non-admin token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn profile(admin: web::ReqData<Claims>) -> HttpResponse {
    log::info!("👤 GET /admin/profile - {}", admin.username);

    HttpResponse::Ok().json(serde_json::json!({ "username": admin.username }))
}

#[utoipa::path(
    post,
    path = "/admin/signup",
    tag = "Admin",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Admin created", body = AuthResponse),
        (status = 403, description = "Admin already exists")
    )
)]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    log::info!("📝 POST /admin/signup - username: {}", request.username);

    let username = request.username.clone();
    match auth_service::signup(&state, Role::Admin, request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            log::warn!("❌ Admin signup failed: {} - {}", username, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "Admin",
    params(
        ("username" = String, Header, description = "Admin username"),
        ("password" = String, Header, description = "Admin password")
    ),
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 403, description = "Invalid username or password")
    )
)]
pub async fn login(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let request = login_request(&req)?;
    log::info!("🔐 POST /admin/login - username: {}", request.username);

    let username = request.username.clone();
    match auth_service::login(&state, Role::Admin, request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            log::warn!("❌ Admin login failed: {} - {}", username, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/admin/courses",
    tag = "Admin",
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Course created"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid, expired or non-admin token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    state: web::Data<AppState>,
    admin: web::ReqData<Claims>,
    body: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let course_id = course_service::create_course(state.store.as_ref(), body.into_inner()).await?;
    log::info!("✅ Course {} created by {}", course_id, admin.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Course created successfully",
        "courseId": course_id
    })))
}

#[utoipa::path(
    put,
    path = "/admin/courses/{course_id}",
    tag = "Admin",
    params(("course_id" = String, Path, description = "Course id (24 hex chars)")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated"),
        (status = 404, description = "Course not found"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid, expired or non-admin token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("✏️  PUT /admin/courses/{}", course_id);

    let course = course_service::update_course(state.store.as_ref(), &course_id, &body).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Course updated successfully",
        "course": course
    })))
}

#[utoipa::path(
    get,
    path = "/admin/courses",
    tag = "Admin",
    responses(
        (status = 200, description = "Every course, published or not", body = Vec<CourseResponse>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid, expired or non-admin token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_courses(
    state: web::Data<AppState>,
    admin: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let courses = course_service::list_courses(state.store.as_ref(), false).await?;
    log::info!("📚 GET /admin/courses - {} course(s) for {}", courses.len(), admin.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "courses": courses })))
}
