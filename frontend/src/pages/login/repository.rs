use std::rc::Rc;

use crate::api::{ApiClient, ApiError, LoginResponse, UserResponse};

use super::utils::{validate_credentials, validate_registration, LoginInput, RegistrationInput};

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl LoginRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    async fn login(&self, input: &LoginInput) -> Result<LoginResponse, ApiError> {
        let request = validate_credentials(input)?;
        self.client.login(&request).await
    }

    /// Validates, authenticates, then hands the token to the session.
    pub async fn submit_login(&self, input: LoginInput) -> Result<UserResponse, ApiError> {
        let response = self.login(&input).await?;
        let user = response.user.clone();
        self.client
            .session()
            .login(response.access_token, response.user)?;
        Ok(user)
    }

    /// Every check runs before the request is built.
    pub async fn submit_registration(&self, input: RegistrationInput) -> Result<(), ApiError> {
        let request = validate_registration(&input)?;
        let response = self.client.register(&request).await?;
        log::info!(
            "Registered {}{}",
            request.email,
            response
                .message
                .map(|message| format!(" ({})", message))
                .unwrap_or_default()
        );
        Ok(())
    }

    pub fn logout(&self) {
        self.client.session().logout();
    }
}
