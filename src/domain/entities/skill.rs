use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const MAX_LEVEL: u8 = 100;

/// A single skill shown as one segment of the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Skill {
    #[validate(length(min = 1, max = 60, message = "Skill name must be 1-60 characters"))]
    pub name: String,

    #[validate(range(max = 100, message = "Level must be between 0 and 100"))]
    pub level: u8,

    #[serde(default)]
    #[validate(length(max = 500, message = "Justification is too long"))]
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SkillCategory {
    #[validate(length(min = 1, max = 60, message = "Category label must be 1-60 characters"))]
    pub category: String,

    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,

    #[serde(default)]
    #[validate(nested)]
    pub skills: Vec<Skill>,
}

/// Body of `PUT /api/profile/skills`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillsUpdate {
    #[validate(nested)]
    pub categories: Vec<SkillCategory>,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: u8, justification: impl Into<String>) -> Self {
        Skill {
            name: name.into(),
            level,
            justification: justification.into(),
        }
    }
}

impl SkillCategory {
    pub fn new(category: impl Into<String>, color: impl Into<String>, skills: Vec<Skill>) -> Self {
        SkillCategory {
            category: category.into(),
            color: color.into(),
            skills,
        }
    }
}

/// Accepts `#rgb` and `#rrggbb`.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let digits = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_color");
        err.message = Some(Cow::Borrowed("Color must be a hex value like #3b82f6"));
        Err(err)
    }
}
