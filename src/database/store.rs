use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{Admin, Course, UpdateCourseRequest, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique index violation on insert
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam between the services and the document store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts unless an admin with the same username exists.
    async fn insert_admin(&self, admin: Admin) -> StoreResult<()>;
    async fn find_admin(&self, username: &str) -> StoreResult<Option<Admin>>;

    /// Inserts unless a user with the same username exists.
    async fn insert_user(&self, user: User) -> StoreResult<()>;
    async fn find_user(&self, username: &str) -> StoreResult<Option<User>>;

    /// Appends a course to the user's purchases. `false` when the user is unknown.
    async fn push_purchase(&self, username: &str, course_id: ObjectId) -> StoreResult<bool>;

    async fn insert_course(&self, course: Course) -> StoreResult<ObjectId>;
    async fn find_course(&self, id: ObjectId) -> StoreResult<Option<Course>>;

    /// Applies the present fields and returns the course after the update.
    async fn update_course(
        &self,
        id: ObjectId,
        patch: &UpdateCourseRequest,
    ) -> StoreResult<Option<Course>>;

    async fn list_courses(&self, published_only: bool) -> StoreResult<Vec<Course>>;

    /// Courses matching any of `ids`, in no particular order.
    async fn find_courses(&self, ids: &[ObjectId]) -> StoreResult<Vec<Course>>;
}
