pub mod about;
pub mod auth;
pub mod blog;
pub mod comment;
pub mod contact;
pub mod dashboard;
pub mod paas;
pub mod project;
pub mod security;
pub mod system;
pub mod tts;
