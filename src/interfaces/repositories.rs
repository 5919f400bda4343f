pub mod about;
pub mod api_repo;
pub mod blog_post;
pub mod comment;
pub mod contact_me;
pub mod paas;
pub mod project;
pub mod security;
pub mod system;
pub mod tts;
pub mod user;
