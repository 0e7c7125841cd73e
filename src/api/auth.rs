use reqwest::Method;
use tracing::info;

use crate::api::{ApiClient, Auth, decode};
use crate::error::ApiResult;
use crate::models::users::{LoginRequest, SignupRequest};
use crate::models::{LoginResponse, UserDto};

impl ApiClient {
    /// POST /api/auth/login: exchange credentials for a token and store it.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let builder = self
            .anonymous(Method::POST, "/api/auth/login")
            .json(credentials);
        let response = self.send_as(builder, Auth::Credentials).await?;
        let login: LoginResponse = decode(response).await?;

        self.session.establish(&login).await?;
        info!("Logged in as {}", login.user.username);
        Ok(login)
    }

    /// POST /api/auth/signup: create an account; the response logs it in.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<LoginResponse> {
        let builder = self
            .anonymous(Method::POST, "/api/auth/signup")
            .json(request);
        let response = self.send_as(builder, Auth::Credentials).await?;
        let login: LoginResponse = decode(response).await?;

        self.session.establish(&login).await?;
        info!("Signed up as {}", login.user.username);
        Ok(login)
    }

    /// Drop the local session. The backend keeps no server-side state for it.
    pub async fn logout(&self) -> ApiResult<()> {
        self.session.logout().await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn current_user(&self) -> Option<UserDto> {
        self.session.current_user().await
    }
}
