use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::{blog_post::new_validation_error, option_fields::OptionField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaasStatus {
    #[display("pending")]
    Pending,
    #[display("deploying")]
    Deploying,
    #[display("running")]
    Running,
    #[display("failed")]
    Failed,
    #[display("stopped")]
    Stopped,
}

impl PaasStatus {
    /// Whether the backend is still working on the deployment. The pollers do
    /// not stop on settled states; this only drives spinners and buttons.
    pub fn is_transitional(self) -> bool {
        matches!(self, PaasStatus::Pending | PaasStatus::Deploying)
    }

    pub fn can_start(self) -> bool {
        matches!(self, PaasStatus::Stopped | PaasStatus::Failed)
    }

    pub fn can_stop(self) -> bool {
        self == PaasStatus::Running
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaasProject {
    pub id: i64,
    pub repo_url: String,
    pub name: String,
    pub status: PaasStatus,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub host_url: Option<String>,
    #[serde(default)]
    pub logs: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaasProject {
    /// Last `n` log lines, for the detail page's tail view.
    pub fn log_tail(&self, n: usize) -> Vec<&str> {
        let Some(logs) = self.logs.as_deref() else {
            return Vec::new();
        };
        let lines: Vec<&str> = logs.lines().collect();
        lines[lines.len().saturating_sub(n)..].to_vec()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPaasProject {
    #[validate(custom(function = "validate_repo_url"))]
    pub repo_url: String,

    #[validate(length(min = 1, max = 63, message = "Name must be 1-63 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NewPaasProject {
    /// Defaults the name to the repository's last path segment.
    pub fn with_default_name(mut self) -> Self {
        if self.name.is_none() {
            self.name = repo_name(&self.repo_url);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Validate, Default)]
pub struct UpdatePaasProject {
    #[validate(length(min = 1, max = 63))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub name: OptionField<String>,

    #[validate(custom(function = "validate_optional_repo_url"))]
    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub repo_url: OptionField<String>,
}

pub fn validate_repo_url(repo_url: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(repo_url)
        .map_err(|_| new_validation_error("invalid_repo_url", "Repository URL is not a valid URL"))?;

    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(new_validation_error("invalid_repo_scheme", "Repository URL must use http(s)"));
    }
    let segments = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).count())
        .unwrap_or(0);
    if parsed.host_str().is_none() || segments < 2 {
        return Err(new_validation_error("invalid_repo_path", "Repository URL must point at owner/repository"));
    }
    Ok(())
}

fn validate_optional_repo_url(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(url) => validate_repo_url(url),
        OptionField::SetToNull => Err(new_validation_error("repo_url_null", "Repository URL cannot be removed")),
        OptionField::Unchanged => Ok(()),
    }
}

/// `https://github.com/me/site.git` → `site`.
pub fn repo_name(repo_url: &str) -> Option<String> {
    let parsed = url::Url::parse(repo_url).ok()?;
    let last = parsed.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then(|| name.to_string())
}
