use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Course as stored in the `courses` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_link: String,
    /// Only published courses are visible to learners
    #[serde(default)]
    pub published: bool,
}

/// Body of `POST /admin/courses`
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub published: bool,
}

impl From<CreateCourseRequest> for Course {
    fn from(req: CreateCourseRequest) -> Self {
        Course {
            id: None,
            title: req.title,
            description: req.description,
            price: req.price,
            image_link: req.image_link,
            published: req.published,
        }
    }
}

/// Body of `PUT /admin/courses/{course_id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_link: Option<String>,
    pub published: Option<bool>,
}

impl UpdateCourseRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_link.is_none()
            && self.published.is_none()
    }

    /// `$set` document holding only the fields present in the request
    pub fn to_set_document(&self) -> Document {
        let mut update_doc = Document::new();

        if let Some(title) = &self.title { update_doc.insert("title", title); }
        if let Some(description) = &self.description { update_doc.insert("description", description); }
        if let Some(price) = self.price { update_doc.insert("price", price); }
        if let Some(image_link) = &self.image_link { update_doc.insert("imageLink", image_link); }
        if let Some(published) = self.published { update_doc.insert("published", published); }

        update_doc
    }

    pub fn apply(&self, course: &mut Course) {
        if let Some(title) = &self.title { course.title = title.clone(); }
        if let Some(description) = &self.description { course.description = description.clone(); }
        if let Some(price) = self.price { course.price = price; }
        if let Some(image_link) = &self.image_link { course.image_link = image_link.clone(); }
        if let Some(published) = self.published { course.published = published; }
    }
}

/// Course as returned over HTTP
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_link: String,
    pub published: bool,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        CourseResponse {
            id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: c.title,
            description: c.description,
            price: c.price,
            image_link: c.image_link,
            published: c.published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn sample() -> Course {
        Course {
            id: Some(ObjectId::new()),
            title: "Go 101".into(),
            description: "Intro".into(),
            price: 10.0,
            image_link: "https://img/go.png".into(),
            published: false,
        }
    }

    #[test]
    fn test_set_document_only_has_present_fields() {
        let patch = UpdateCourseRequest {
            price: Some(12.5),
            published: Some(true),
            ..Default::default()
        };
        assert_eq!(patch.to_set_document(), doc! { "price": 12.5, "published": true });
    }

    #[test]
    fn test_apply_patch() {
        let mut course = sample();
        let patch = UpdateCourseRequest {
            title: Some("Go 102".into()),
            image_link: Some("https://img/go2.png".into()),
            ..Default::default()
        };
        patch.apply(&mut course);

        assert_eq!(course.title, "Go 102");
        assert_eq!(course.image_link, "https://img/go2.png");
        assert_eq!(course.description, "Intro");
        assert_eq!(course.price, 10.0);
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateCourseRequest =
            serde_json::from_value(serde_json::json!({ "title": "Go 101", "price": 10, "published": true }))
                .unwrap();
        let course = Course::from(req);
        assert_eq!(course.description, "");
        assert_eq!(course.image_link, "");
        assert!(course.published);
    }

    #[test]
    fn test_create_request_accepts_partial_body() {
        let req: CreateCourseRequest =
            serde_json::from_value(serde_json::json!({ "price": 5 })).unwrap();
        assert_eq!(req.title, "");
        assert_eq!(req.price, 5.0);

        let req: CreateCourseRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(req.price, 0.0);
        assert!(!req.published);
    }

    #[test]
    fn test_sparse_stored_document_still_loads() {
        let id = ObjectId::new();
        let course: Course =
            mongodb::bson::from_document(doc! { "_id": id, "published": true }).unwrap();
        assert_eq!(course.id, Some(id));
        assert_eq!(course.title, "");
        assert_eq!(course.price, 0.0);
        assert!(course.published);
    }

    #[test]
    fn test_response_uses_camel_case_and_hex_id() {
        let course = sample();
        let hex = course.id.unwrap().to_hex();
        let json = serde_json::to_value(CourseResponse::from(course)).unwrap();
        assert_eq!(json["id"], hex);
        assert_eq!(json["imageLink"], "https://img/go.png");
    }
}
