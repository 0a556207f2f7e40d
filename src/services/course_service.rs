use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::database::Store;
use crate::models::{Course, CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::utils::AppError;

fn course_not_found() -> AppError {
    AppError::NotFound("Course not found".to_string())
}

/// Ids that are not valid ObjectIds cannot name a course.
fn parse_course_id(course_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(course_id).map_err(|_| course_not_found())
}

pub async fn create_course(store: &dyn Store, request: CreateCourseRequest) -> Result<String, AppError> {
    let id = store.insert_course(Course::from(request)).await?;
    Ok(id.to_hex())
}

pub async fn update_course(
    store: &dyn Store,
    course_id: &str,
    patch: &UpdateCourseRequest,
) -> Result<CourseResponse, AppError> {
    let id = parse_course_id(course_id)?;

    store
        .update_course(id, patch)
        .await?
        .map(CourseResponse::from)
        .ok_or_else(course_not_found)
}

pub async fn list_courses(store: &dyn Store, published_only: bool) -> Result<Vec<CourseResponse>, AppError> {
    let courses = store.list_courses(published_only).await?;
    Ok(courses.into_iter().map(CourseResponse::from).collect())
}

/// Appends the course to the learner's purchases. Repeat purchases append again.
pub async fn purchase_course(store: &dyn Store, username: &str, course_id: &str) -> Result<(), AppError> {
    let id = parse_course_id(course_id)?;

    if store.find_course(id).await?.is_none() {
        return Err(course_not_found());
    }

    if !store.push_purchase(username, id).await? {
        return Err(AppError::Forbidden("User not found".to_string()));
    }

    Ok(())
}

/// Purchased courses in purchase order. References to courses that no longer
/// exist are skipped.
pub async fn purchased_courses(store: &dyn Store, username: &str) -> Result<Vec<CourseResponse>, AppError> {
    let user = store
        .find_user(username)
        .await?
        .ok_or_else(|| AppError::Forbidden("User not found".to_string()))?;

    let courses: HashMap<ObjectId, Course> = store
        .find_courses(&user.purchased_courses)
        .await?
        .into_iter()
        .filter_map(|course| course.id.map(|id| (id, course)))
        .collect();

    Ok(user
        .purchased_courses
        .iter()
        .filter_map(|id| courses.get(id).cloned())
        .map(CourseResponse::from)
        .collect())
}
