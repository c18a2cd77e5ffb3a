//! Middleware that answers `GET <scope>/site/...` from the local store.
//!
//! Anything else goes to the inner router unchanged.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::response::{bad_request, file_response, ApiError};
use crate::resolve::{parse_request, resolve, Resolution, SITE_SEGMENT};
use crate::store::SiteReader;

#[derive(Clone)]
pub struct Interceptor {
    scope: String,
    reader: Arc<dyn SiteReader>,
}

impl Interceptor {
    /// `scope` is the path prefix the interceptor is registered under, without a trailing slash.
    pub fn new(scope: impl Into<String>, reader: Arc<dyn SiteReader>) -> Self {
        let scope = scope.into().trim_end_matches('/').to_string();
        Self { scope, reader }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The scope-relative path when this request belongs to the site namespace.
    pub fn claims<'a>(&self, method: &Method, path: &'a str) -> Option<&'a str> {
        if method != Method::GET {
            return None;
        }

        let relative = path.strip_prefix(self.scope.as_str())?.strip_prefix('/')?;
        let in_namespace = relative
            .strip_prefix(SITE_SEGMENT)
            .is_some_and(|rest| rest.starts_with('/'));

        in_namespace.then_some(relative)
    }

    /// Build the response for a claimed path, or `None` to let it through.
    pub async fn respond(&self, relative: &str) -> Option<Response> {
        let target = match parse_request(relative) {
            Resolution::PassThrough => return None,
            Resolution::BadRequest => {
                tracing::debug!(path = %relative, "Rejected malformed site path");
                return Some(bad_request());
            }
            Resolution::Lookup(target) => target,
        };

        match resolve(self.reader.as_ref(), &target).await {
            Ok(lookup) => {
                tracing::debug!(
                    ?target,
                    path = %lookup.path,
                    hit = lookup.record.is_some(),
                    "Resolved site request"
                );
                Some(file_response(lookup.record, &lookup.path))
            }
            Err(e) => {
                tracing::error!(?target, error = %e, "Site store lookup failed");
                Some(ApiError::internal(e.to_string()).into_response())
            }
        }
    }
}

/// `axum::middleware::from_fn_with_state` entry point.
pub async fn intercept(
    State(interceptor): State<Interceptor>,
    request: Request,
    next: Next,
) -> Response {
    let claimed = interceptor
        .claims(request.method(), request.uri().path())
        .map(str::to_string);

    let Some(relative) = claimed else {
        return next.run(request).await;
    };

    match interceptor.respond(&relative).await {
        Some(response) => response,
        None => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileRecord, SiteRecord};
    use crate::store::StoreError;

    struct FailingReader;

    #[async_trait::async_trait]
    impl SiteReader for FailingReader {
        async fn get_site(&self, _site_id: &str) -> Result<Option<SiteRecord>, StoreError> {
            Err(StoreError::Task("boom".to_string()))
        }

        async fn get_file(
            &self,
            _site_id: &str,
            _path: &str,
        ) -> Result<Option<FileRecord>, StoreError> {
            Err(StoreError::Task("boom".to_string()))
        }
    }

    fn interceptor(scope: &str) -> Interceptor {
        Interceptor::new(scope, Arc::new(FailingReader))
    }

    #[test]
    fn claims_only_get_under_site_prefix() {
        let root = interceptor("");
        assert_eq!(
            root.claims(&Method::GET, "/site/s1/index.html"),
            Some("site/s1/index.html")
        );
        assert_eq!(root.claims(&Method::GET, "/site/s1"), Some("site/s1"));
        assert_eq!(root.claims(&Method::POST, "/site/s1/index.html"), None);
        assert_eq!(root.claims(&Method::HEAD, "/site/s1/index.html"), None);
        assert_eq!(root.claims(&Method::GET, "/sites/s1/index.html"), None);
        assert_eq!(root.claims(&Method::GET, "/site"), None);
        assert_eq!(root.claims(&Method::GET, "/_internal/health"), None);
    }

    #[test]
    fn claims_respect_scope() {
        let scoped = interceptor("/app/");
        assert_eq!(scoped.scope(), "/app");
        assert_eq!(
            scoped.claims(&Method::GET, "/app/site/s1/"),
            Some("site/s1/")
        );
        assert_eq!(scoped.claims(&Method::GET, "/site/s1/"), None);
        assert_eq!(scoped.claims(&Method::GET, "/appsite/s1/"), None);
    }

    #[tokio::test]
    async fn bad_path_skips_storage() {
        // The failing reader would turn any lookup into a 500
        let response = interceptor("").respond("site/s1/%zz").await.unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_fault_is_internal_error() {
        let response = interceptor("").respond("site/s1/a.css").await.unwrap();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn missing_site_id_passes_through() {
        assert!(interceptor("").respond("site/").await.is_none());
    }
}
