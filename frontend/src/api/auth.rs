use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
};

impl ApiClient {
    /// Exchanges credentials for a token. Does not touch the session; callers
    /// decide when to log in.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }
}
