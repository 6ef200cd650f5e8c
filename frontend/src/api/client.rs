use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{api::types::ApiError, config, state::session::SessionController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

impl Access {
    pub fn for_path(path: &str) -> Self {
        match path {
            "/auth/login" | "/auth/register" => Access::Public,
            _ => Access::Protected,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionController,
}

impl ApiClient {
    pub fn new(session: SessionController) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, session: SessionController) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.trim_end_matches('/').to_string()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Performs one request. `path` may carry a query string; access is
    /// decided from the path alone.
    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let route = path.split('?').next().unwrap_or(path);
        let access = Access::for_path(route);
        let base_url = self.resolved_base_url().await;

        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let token = match access {
            Access::Protected => self.session.token(),
            Access::Public => None,
        };
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        log::debug!(
            "{} {} (bearer: {})",
            method,
            path,
            if token.is_some() { "yes" } else { "no" }
        );

        let response = request.send().await.map_err(|err| {
            log::warn!("{} {} failed: {}", method, path, err);
            ApiError::network()
        })?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };

        if status.is_success() {
            return serde_json::from_str(text).map_err(|err| {
                ApiError::unknown(format!("Failed to parse response: {}", err))
            });
        }

        let message = error_message(status, text);
        if status == StatusCode::UNAUTHORIZED && access == Access::Protected {
            log::warn!("{} {} returned 401; ending session", method, path);
            self.session.on_auth_failure();
            return Err(ApiError::unauthorized(message).with_status(status.as_u16()));
        }
        Err(ApiError::request_failed(message).with_status(status.as_u16()))
    }
}

/// `message`, then `error`, then the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };
    field("message").or_else(|| field("error")).unwrap_or_else(|| {
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_login_and_register_are_public() {
        assert_eq!(Access::for_path("/auth/login"), Access::Public);
        assert_eq!(Access::for_path("/auth/register"), Access::Public);
        assert_eq!(Access::for_path("/books/"), Access::Protected);
        assert_eq!(Access::for_path("/admin/penalties"), Access::Protected);
        assert_eq!(Access::for_path("/auth/login/extra"), Access::Protected);
    }

    #[test]
    fn error_message_prefers_message_then_error_then_status() {
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"message":"Book unavailable","error":"ignored"}"#
            ),
            "Book unavailable"
        );
        assert_eq!(
            error_message(StatusCode::CONFLICT, r#"{"error":"Already borrowed"}"#),
            "Already borrowed"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "{}"),
            "HTTP 404: Not Found"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP 500: Internal Server Error"
        );
    }
}
