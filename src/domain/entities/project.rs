use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{
    blog_post::{validate_slug, validate_url, validate_optional_url_field},
    option_fields::OptionField,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub category: String,
    pub year: i32,
}

impl Project {
    pub fn uses(&self, technology: &str) -> bool {
        self.technologies.iter().any(|t| t.eq_ignore_ascii_case(technology))
    }

    /// Thumbnail for cards, falling back to the full image.
    pub fn card_image(&self) -> Option<&str> {
        self.thumbnail.as_deref().or(self.image.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[validate(length(min = 3, max = 120))]
    pub title: String,

    #[validate(length(min = 3, max = 80), custom(function = "validate_slug"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[validate(length(min = 10, max = 300))]
    pub description: String,

    pub long_description: String,

    #[validate(custom(function = "validate_url"))]
    pub thumbnail: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub image: Option<String>,

    #[validate(length(max = 20, message = "Too many technologies"))]
    pub technologies: Vec<String>,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub live_url: Option<String>,

    pub featured: bool,

    #[validate(length(min = 1, max = 40))]
    pub category: String,

    #[validate(range(min = 1990, max = 2100))]
    pub year: i32,
}

impl NewProjectRequest {
    pub fn with_generated_slug(mut self) -> Self {
        if self.slug.is_none() {
            self.slug = Some(slug::slugify(&self.title));
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 3, max = 120))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub title: OptionField<String>,

    #[validate(length(min = 10, max = 300))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub description: OptionField<String>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub long_description: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub github_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub live_url: OptionField<String>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub technologies: OptionField<Vec<String>>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub featured: OptionField<bool>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub category: OptionField<String>,
}
