use reqwest::Method;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::saved_queries::{CreateSavedQuery, UpdateSavedQuery};
use crate::models::{JobSearchParams, JobSearchResponse, SavedQuery};

/// Shown when the backend reports a duplicate (query, location) pair.
pub const DUPLICATE_SEARCH: &str = "A saved search for this query and location already exists";

impl ApiClient {
    /// GET /api/jobs/search: the backend refreshes its job store, then
    /// returns every posting matching the parameters.
    pub async fn search_jobs(&self, params: &JobSearchParams) -> ApiResult<JobSearchResponse> {
        debug!(
            "Searching jobs: query={} location={} distance={}",
            params.query, params.location, params.distance
        );
        let builder = self
            .request(Method::GET, "/api/jobs/search")
            .await
            .query(params);
        let response: JobSearchResponse = self.send_json(builder).await?;
        info!("Search returned {} jobs", response.results.len());
        Ok(response)
    }

    // ── Saved queries ──

    /// GET /api/jobs/saved-queries: most recently run first.
    pub async fn list_saved_queries(&self) -> ApiResult<Vec<SavedQuery>> {
        let builder = self.request(Method::GET, "/api/jobs/saved-queries").await;
        self.send_json(builder).await
    }

    /// GET /api/jobs/saved-queries/active
    pub async fn list_active_saved_queries(&self) -> ApiResult<Vec<SavedQuery>> {
        let builder = self
            .request(Method::GET, "/api/jobs/saved-queries/active")
            .await;
        self.send_json(builder).await
    }

    /// GET /api/jobs/saved-queries/{id}
    pub async fn get_saved_query(&self, id: i64) -> ApiResult<SavedQuery> {
        let builder = self
            .request(Method::GET, &format!("/api/jobs/saved-queries/{id}"))
            .await;
        self.send_json(builder).await
    }

    /// POST /api/jobs/saved-queries: returns the backend's confirmation text.
    ///
    /// A duplicate (query, location) comes back as [`ApiError::Conflict`]
    /// carrying [`DUPLICATE_SEARCH`].
    pub async fn create_saved_query(&self, input: &CreateSavedQuery) -> ApiResult<String> {
        let builder = self
            .request(Method::POST, "/api/jobs/saved-queries")
            .await
            .json(input);
        let response = self.send(builder).await.map_err(|e| match e {
            ApiError::Conflict(_) => ApiError::Conflict(DUPLICATE_SEARCH.to_string()),
            other => other,
        })?;
        let message = response.text().await?;
        info!("Saved search {} in {}", input.query, input.location);
        Ok(message)
    }

    /// PUT /api/jobs/saved-queries/{id}
    pub async fn update_saved_query(
        &self,
        id: i64,
        input: &UpdateSavedQuery,
    ) -> ApiResult<SavedQuery> {
        let builder = self
            .request(Method::PUT, &format!("/api/jobs/saved-queries/{id}"))
            .await
            .json(input);
        self.send_json(builder).await
    }

    /// PATCH /api/jobs/saved-queries/{id}/toggle: flip the active flag.
    pub async fn toggle_saved_query(&self, id: i64) -> ApiResult<SavedQuery> {
        let builder = self
            .request(Method::PATCH, &format!("/api/jobs/saved-queries/{id}/toggle"))
            .await;
        self.send_json(builder).await
    }

    /// DELETE /api/jobs/saved-queries/{id}
    pub async fn delete_saved_query(&self, id: i64) -> ApiResult<()> {
        let builder = self
            .request(Method::DELETE, &format!("/api/jobs/saved-queries/{id}"))
            .await;
        self.send(builder).await?;
        info!("Deleted saved search {id}");
        Ok(())
    }
}
