pub mod auth_service;
pub mod course_service;
pub mod token_service;
