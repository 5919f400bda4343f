use std::sync::Arc;

use crate::http::api_client::ApiClient;

#[derive(Clone)]
pub struct ApiUserRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiSecurityRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiAboutRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiBlogPostRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiProjectRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiCommentRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiContactMeRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiSystemRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiPaasRepo {
    pub client: Arc<ApiClient>,
}

#[derive(Clone)]
pub struct ApiTtsRepo {
    pub client: Arc<ApiClient>,
}

/// Percent-encodes a single path segment such as a slug.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters_in_segments() {
        assert_eq!(segment("hello-world"), "hello-world");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
