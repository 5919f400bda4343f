use std::borrow::Cow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    entities::option_fields::OptionField,
    utils::html::{sanitize_html, text_excerpt},
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MIN_SLUG_LENGTH: u64 = 3;
const MAX_SLUG_LENGTH: u64 = 80;
const MIN_EXCERPT_LENGTH: u64 = 10;
const MAX_EXCERPT_LENGTH: u64 = 300;
const MAX_TAGS: usize = 10;
const MAX_TAG_LENGTH: usize = 30;
const CARD_EXCERPT_CHARS: usize = 160;


// ───── Backend Models ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// HTML as stored by the backend. Use [`BlogPost::safe_content`] for display.
    pub content: String,
    pub date: NaiveDate,
    pub reading_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub cover_image: Option<String>,
}

// ───── View Models ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
    pub reading_time: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetail {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content_html: String,
    pub date: NaiveDate,
    pub reading_time: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPostRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[validate(length(min = MIN_EXCERPT_LENGTH, max = MAX_EXCERPT_LENGTH))]
    pub excerpt: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(custom(function = "validate_url"))]
    pub cover_image: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    pub featured: bool,
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    #[validate(custom(function = "validate_optional_title"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub title: OptionField<String>,

    #[validate(custom(function = "validate_optional_slug"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub slug: OptionField<String>,

    #[validate(length(min = MIN_EXCERPT_LENGTH, max = MAX_EXCERPT_LENGTH))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub excerpt: OptionField<String>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub content: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub cover_image: OptionField<String>,

    #[validate(custom(function = "validate_optional_tags"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub tags: OptionField<Vec<String>>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub featured: OptionField<bool>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub published: OptionField<bool>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(new_validation_error("too_many_tags", "Too many tags provided"));
    }
    for tag in tags {
        if tag.trim().is_empty() || tag.len() > MAX_TAG_LENGTH {
            return Err(new_validation_error("invalid_tag_length", "Tag length must be within allowed range"));
        }
        if !tag.chars().all(|c| c.is_alphanumeric() || " -.+#".contains(c)) {
            return Err(new_validation_error("invalid_tag_chars", "Tags may only contain letters, digits, spaces and - . + #"));
        }
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().len() != title.len() {
        return Err(new_validation_error("title_whitespace", "Title must not have leading or trailing whitespace"));
    }
    Ok(())
}

pub fn validate_optional_title(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(title) => {
            let len = title.chars().count() as u64;
            if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
                return Err(new_validation_error("title_length", "Title must be 3-120 characters"));
            }
            validate_title(title)
        }
        OptionField::SetToNull => Err(new_validation_error("title_null", "Title cannot be removed")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_slug(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(slug) => validate_slug(slug),
        OptionField::SetToNull => Err(new_validation_error("slug_null", "Slug cannot be removed")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_url_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_url(url)?;
    }
    Ok(())
}

pub fn validate_optional_tags(value: &OptionField<Vec<String>>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(tags) = value {
        validate_tags(tags)?;
    }
    Ok(())
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

// ───── Conversions ──────────────────────────────────────────────────

impl NewBlogPostRequest {
    /// Validates the form and fills in a slug derived from the title when
    /// none was given.
    pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
        self.validate()?;

        if self.slug.is_none() {
            let generated = slug::slugify(&self.title);
            if generated.len() < MIN_SLUG_LENGTH as usize {
                let mut errors = ValidationErrors::new();
                errors.add("slug", new_validation_error("slug_too_short", "Generated slug is too short; please provide a custom slug"));
                return Err(errors);
            }
            self.slug = Some(generated);
        }

        self.tags = self.tags.into_iter().map(|t| t.trim().to_string()).collect();
        Ok(self)
    }
}

impl BlogPost {
    /// Content with scripts, handlers and unsafe URLs stripped.
    pub fn safe_content(&self) -> String {
        sanitize_html(&self.content)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn to_card(&self) -> BlogPostCard {
        BlogPostCard {
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: if self.excerpt.trim().is_empty() {
                text_excerpt(&self.content, CARD_EXCERPT_CHARS)
            } else {
                self.excerpt.clone()
            },
            date: self.date,
            reading_time: self.reading_time.clone(),
            tags: self.tags.clone(),
            cover_image: self.cover_image.clone(),
        }
    }

    pub fn to_detail(&self) -> BlogPostDetail {
        BlogPostDetail {
            id: self.id,
            slug: self.slug.clone(),
            title: self.title.clone(),
            content_html: self.safe_content(),
            date: self.date,
            reading_time: self.reading_time.clone(),
            tags: self.tags.clone(),
            cover_image: self.cover_image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, slug: Option<&str>) -> NewBlogPostRequest {
        NewBlogPostRequest {
            title: title.into(),
            slug: slug.map(str::to_string),
            excerpt: "A short excerpt for the card".into(),
            content: "<p>Hello</p>".into(),
            cover_image: None,
            tags: vec![" rust ".into(), "web".into()],
            featured: false,
            published: true,
        }
    }

    #[test]
    fn prepare_generates_slug_from_title() {
        let post = new_post("Building a Skill Wheel", None).prepare().unwrap();
        assert_eq!(post.slug.as_deref(), Some("building-a-skill-wheel"));
        assert_eq!(post.tags, vec!["rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn prepare_rejects_bad_slug() {
        assert!(new_post("Valid title", Some("Bad Slug")).prepare().is_err());
        assert!(new_post("Valid title", Some("-edge")).prepare().is_err());
    }

    #[test]
    fn update_only_serializes_touched_fields() {
        let update = UpdateBlogPostRequest {
            title: OptionField::SetToValue("New title".into()),
            cover_image: OptionField::SetToNull,
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New title", "coverImage": null}));
    }

    #[test]
    fn deserializes_backend_shape() {
        let post: BlogPost = serde_json::from_value(serde_json::json!({
            "id": 7,
            "slug": "hello-world",
            "title": "Hello world",
            "excerpt": "First post",
            "content": "<p>Hi</p><script>alert(1)</script>",
            "date": "2024-03-01",
            "readingTime": "3 min read",
            "tags": ["intro"],
            "featured": true,
            "published": true
        }))
        .unwrap();

        assert_eq!(post.cover_image, None);
        assert!(post.has_tag("INTRO"));
        assert_eq!(post.to_detail().content_html, "<p>Hi</p>");
    }
}
