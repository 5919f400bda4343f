use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::blog_post::validate_url;

/// Owner profile rendered on the about page and edited from the admin area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(length(max = 120))]
    pub headline: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub bio: String,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub resume_url: Option<String>,

    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}
