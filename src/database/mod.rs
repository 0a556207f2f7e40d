pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::{Store, StoreError, StoreResult};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::{Admin, Course, UpdateCourseRequest, User};

const USERS: &str = "users";
const ADMINS: &str = "admins";
const COURSES: &str = "courses";

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> StoreResult<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("course-market".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Fail at start-up rather than on the first request
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique usernames make signup a single conditional insert.
    async fn ensure_indexes(&self) -> StoreResult<()> {
        log::info!("🔧 Creating database indexes...");

        for name in [USERS, ADMINS] {
            let index = IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();

            self.collection::<Document>(name).create_index(index).await?;
            log::info!("   ✅ Index ready: {}(username) unique", name);
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn insert_error(err: mongodb::error::Error, what: &str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::AlreadyExists(what.to_string())
    } else {
        StoreError::Mongo(err)
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn insert_admin(&self, admin: Admin) -> StoreResult<()> {
        self.collection::<Admin>(ADMINS)
            .insert_one(&admin)
            .await
            .map_err(|e| insert_error(e, "Admin"))?;
        Ok(())
    }

    async fn find_admin(&self, username: &str) -> StoreResult<Option<Admin>> {
        Ok(self
            .collection::<Admin>(ADMINS)
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn insert_user(&self, user: User) -> StoreResult<()> {
        self.collection::<User>(USERS)
            .insert_one(&user)
            .await
            .map_err(|e| insert_error(e, "User"))?;
        Ok(())
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn push_purchase(&self, username: &str, course_id: ObjectId) -> StoreResult<bool> {
        let result = self
            .collection::<User>(USERS)
            .update_one(
                doc! { "username": username },
                doc! { "$push": { "purchasedCourses": course_id } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn insert_course(&self, course: Course) -> StoreResult<ObjectId> {
        let mut course = course;
        let id = ObjectId::new();
        course.id = Some(id);

        self.collection::<Course>(COURSES).insert_one(&course).await?;
        Ok(id)
    }

    async fn find_course(&self, id: ObjectId) -> StoreResult<Option<Course>> {
        Ok(self
            .collection::<Course>(COURSES)
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn update_course(
        &self,
        id: ObjectId,
        patch: &UpdateCourseRequest,
    ) -> StoreResult<Option<Course>> {
        // `$set` rejects an empty document
        if patch.is_empty() {
            return self.find_course(id).await;
        }

        Ok(self
            .collection::<Course>(COURSES)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch.to_set_document() })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn list_courses(&self, published_only: bool) -> StoreResult<Vec<Course>> {
        let filter = if published_only {
            doc! { "published": true }
        } else {
            doc! {}
        };

        let cursor = self.collection::<Course>(COURSES).find(filter).await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        Ok(courses)
    }

    async fn find_courses(&self, ids: &[ObjectId]) -> StoreResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection::<Course>(COURSES)
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_round_trip() {
        dotenv::dotenv().ok();
        let config = Config::from_env().unwrap();
        let db = MongoDB::new(&config.database_url, "course_market_test").await.unwrap();

        let username = format!("user-{}", ObjectId::new().to_hex());
        db.insert_user(User::new(username.clone(), "hash".into())).await.unwrap();
        assert!(matches!(
            db.insert_user(User::new(username.clone(), "hash".into())).await,
            Err(StoreError::AlreadyExists(_))
        ));

        let course_id = db
            .insert_course(Course {
                id: None,
                title: "Go 101".into(),
                description: String::new(),
                price: 10.0,
                image_link: String::new(),
                published: true,
            })
            .await
            .unwrap();
        assert!(db.push_purchase(&username, course_id).await.unwrap());

        let user = db.find_user(&username).await.unwrap().unwrap();
        assert_eq!(user.purchased_courses, vec![course_id]);
    }
}
