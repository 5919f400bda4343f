use serde::{Deserialize, Serialize};

use crate::entities::{blog_post::BlogPost, project::Project};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResults {
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.projects.is_empty()
    }

    pub fn total(&self) -> usize {
        self.posts.len() + self.projects.len()
    }
}
