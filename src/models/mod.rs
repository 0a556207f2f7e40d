pub mod admin;
pub mod course;
pub mod user;

pub use admin::*;
pub use course::*;
pub use user::*;
