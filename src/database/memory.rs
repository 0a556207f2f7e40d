use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{Admin, Course, UpdateCourseRequest, User};

/// In-process store used by the HTTP tests.
#[derive(Default)]
pub struct MemoryStore {
    admins: RwLock<Vec<Admin>>,
    users: RwLock<Vec<User>>,
    courses: RwLock<Vec<Course>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_admin(&self, mut admin: Admin) -> StoreResult<()> {
        let mut admins = self.admins.write().await;
        if admins.iter().any(|a| a.username == admin.username) {
            return Err(StoreError::AlreadyExists("Admin".into()));
        }
        admin.id = Some(ObjectId::new());
        admins.push(admin);
        Ok(())
    }

    async fn find_admin(&self, username: &str) -> StoreResult<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.iter().find(|a| a.username == username).cloned())
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::AlreadyExists("User".into()));
        }
        user.id = Some(ObjectId::new());
        users.push(user);
        Ok(())
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn push_purchase(&self, username: &str, course_id: ObjectId) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.purchased_courses.push(course_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_course(&self, mut course: Course) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        course.id = Some(id);
        self.courses.write().await.push(course);
        Ok(id)
    }

    async fn find_course(&self, id: ObjectId) -> StoreResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|c| c.id == Some(id)).cloned())
    }

    async fn update_course(
        &self,
        id: ObjectId,
        patch: &UpdateCourseRequest,
    ) -> StoreResult<Option<Course>> {
        let mut courses = self.courses.write().await;
        Ok(courses.iter_mut().find(|c| c.id == Some(id)).map(|course| {
            patch.apply(course);
            course.clone()
        }))
    }

    async fn list_courses(&self, published_only: bool) -> StoreResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| !published_only || c.published)
            .cloned()
            .collect())
    }

    async fn find_courses(&self, ids: &[ObjectId]) -> StoreResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| c.id.map_or(false, |id| ids.contains(&id)))
            .cloned()
            .collect())
    }
}
