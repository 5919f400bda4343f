pub mod about_me;
pub mod blog_post;
pub mod comment;
pub mod contact_me;
pub mod mfa;
pub mod option_fields;
pub mod paas_project;
pub mod project;
pub mod search;
pub mod skill;
pub mod system;
pub mod token;
pub mod tts;
pub mod upload;
pub mod user;
