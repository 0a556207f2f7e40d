use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    /// bcrypt hash, never the plaintext password
    pub password: String,
}

impl Admin {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: None,
            username,
            password: password_hash,
        }
    }
}
