use reqwest::Method;
use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::applications::{CreateApplication, UpdateApplication};
use crate::models::{Application, ApplicationStats, ApplicationStatus};

impl ApiClient {
    /// GET /api/applications: the current user's applications.
    pub async fn list_applications(&self) -> ApiResult<Vec<Application>> {
        let builder = self.request(Method::GET, "/api/applications").await;
        self.send_json(builder).await
    }

    /// GET /api/applications/{id}
    pub async fn get_application(&self, id: i64) -> ApiResult<Application> {
        let builder = self
            .request(Method::GET, &format!("/api/applications/{id}"))
            .await;
        self.send_json(builder).await
    }

    /// POST /api/applications
    pub async fn create_application(&self, input: &CreateApplication) -> ApiResult<Application> {
        let builder = self
            .request(Method::POST, "/api/applications")
            .await
            .json(input);
        let created: Application = self.send_json(builder).await?;
        info!("Tracking application {} ({})", created.id, created.job_title);
        Ok(created)
    }

    /// PUT /api/applications/{id}
    pub async fn update_application(
        &self,
        id: i64,
        input: &UpdateApplication,
    ) -> ApiResult<Application> {
        let builder = self
            .request(Method::PUT, &format!("/api/applications/{id}"))
            .await
            .json(input);
        self.send_json(builder).await
    }

    /// PATCH /api/applications/{id}/status?status=
    pub async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> ApiResult<Application> {
        let builder = self
            .request(Method::PATCH, &format!("/api/applications/{id}/status"))
            .await
            .query(&[("status", status.as_str())]);
        self.send_json(builder).await
    }

    /// DELETE /api/applications/{id}
    pub async fn delete_application(&self, id: i64) -> ApiResult<()> {
        let builder = self
            .request(Method::DELETE, &format!("/api/applications/{id}"))
            .await;
        self.send(builder).await?;
        info!("Deleted application {id}");
        Ok(())
    }

    /// GET /api/applications/status/{status}
    pub async fn list_applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> ApiResult<Vec<Application>> {
        let builder = self
            .request(Method::GET, &format!("/api/applications/status/{status}"))
            .await;
        self.send_json(builder).await
    }

    /// GET /api/applications/stats
    pub async fn application_stats(&self) -> ApiResult<ApplicationStats> {
        let builder = self.request(Method::GET, "/api/applications/stats").await;
        self.send_json(builder).await
    }
}
