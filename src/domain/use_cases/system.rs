use crate::{
    entities::{
        search::SearchResults,
        system::{HealthReport, MaintenanceToggle, SystemStatus},
        upload::{UploadRequest, UploadedFile},
    },
    errors::AppError,
    repositories::system::SystemRepository,
    utils::upload::inspect_upload,
};

const MIN_QUERY_CHARS: usize = 2;

pub struct SystemHandler<R>
where
    R: SystemRepository,
{
    pub system_repo: R,
    upload_max_bytes: usize,
}

impl<R> SystemHandler<R>
where
    R: SystemRepository,
{
    pub fn new(system_repo: R, upload_max_bytes: usize) -> Self {
        SystemHandler {
            system_repo,
            upload_max_bytes,
        }
    }

    pub async fn status(&self) -> Result<SystemStatus, AppError> {
        self.system_repo.status().await
    }

    pub async fn health(&self) -> Result<HealthReport, AppError> {
        self.system_repo.health().await
    }

    pub async fn set_maintenance(&self, enabled: bool) -> Result<SystemStatus, AppError> {
        let status = self.system_repo.set_maintenance(&MaintenanceToggle { enabled }).await?;
        tracing::info!(enabled, "Maintenance mode toggled");
        Ok(status)
    }

    /// Site search. Queries shorter than two characters return nothing
    /// without a round-trip, and drafts never show up in results.
    pub async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchResults::default());
        }

        let mut results = self.system_repo.search(query).await?;
        results.posts.retain(|p| p.published);
        Ok(results)
    }

    /// Checks size and sniffs the type locally before uploading.
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadedFile, AppError> {
        let mime_type = inspect_upload(request, self.upload_max_bytes)
            .map_err(|e| AppError::invalid_field("file", e.to_string()))?;

        let uploaded = self
            .system_repo
            .upload(&request.file_name, &request.bytes, mime_type)
            .await?;
        tracing::info!(file = %request.file_name, mime_type, url = %uploaded.url, "File uploaded");
        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mockall::mock;

    use crate::entities::blog_post::BlogPost;

    mock! {
        pub SystemRepo {}

        #[async_trait]
        impl SystemRepository for SystemRepo {
            async fn status(&self) -> Result<SystemStatus, AppError>;
            async fn health(&self) -> Result<HealthReport, AppError>;
            async fn set_maintenance(&self, toggle: &MaintenanceToggle) -> Result<SystemStatus, AppError>;
            async fn search(&self, query: &str) -> Result<SearchResults, AppError>;
            async fn upload(&self, file_name: &str, bytes: &[u8], mime_type: &str) -> Result<UploadedFile, AppError>;
        }
    }

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn post(id: i64, published: bool) -> BlogPost {
        BlogPost {
            id,
            slug: format!("p{}", id),
            title: "Title".into(),
            excerpt: String::new(),
            content: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            reading_time: "1 min read".into(),
            tags: vec![],
            featured: false,
            published,
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn short_queries_skip_the_backend() {
        let mut repo = MockSystemRepo::new();
        repo.expect_search().never();

        let handler = SystemHandler::new(repo, 1024);
        assert!(handler.search("  a ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_drops_drafts() {
        let mut repo = MockSystemRepo::new();
        repo.expect_search()
            .withf(|q| q == "rust")
            .returning(|_| {
                Ok(SearchResults {
                    posts: vec![post(1, true), post(2, false)],
                    projects: vec![],
                })
            });

        let handler = SystemHandler::new(repo, 1024);
        let results = handler.search(" rust ").await.unwrap();
        assert_eq!(results.total(), 1);
        assert_eq!(results.posts[0].id, 1);
    }

    #[tokio::test]
    async fn upload_sends_sniffed_mime_type() {
        let mut repo = MockSystemRepo::new();
        repo.expect_upload()
            .withf(|name, _, mime| name == "avatar.bin" && mime == "image/png")
            .returning(|_, _, _| {
                Ok(UploadedFile {
                    url: "https://cdn.example.com/avatar.png".into(),
                    filename: Some("avatar.png".into()),
                })
            });

        let handler = SystemHandler::new(repo, 1024);
        let request = UploadRequest {
            file_name: "avatar.bin".into(),
            bytes: PNG_HEADER.to_vec(),
        };
        assert_eq!(handler.upload(&request).await.unwrap().url, "https://cdn.example.com/avatar.png");
    }

    #[tokio::test]
    async fn oversized_upload_is_a_field_error() {
        let mut repo = MockSystemRepo::new();
        repo.expect_upload().never();

        let handler = SystemHandler::new(repo, 4);
        let request = UploadRequest {
            file_name: "big.png".into(),
            bytes: PNG_HEADER.to_vec(),
        };

        match handler.upload(&request).await {
            Err(AppError::ValidationError(fields)) => assert_eq!(fields[0].field, "file"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
