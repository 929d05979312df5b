use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ApiError, RondaClient};

/// Bearer token issued by `POST /api/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

const LOGIN_FAILED: &str = "E-mail ou senha inválidos.";

impl RondaClient {
    /// Authenticates and stores the returned token on the client.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Token, ApiError> {
        let url = self.endpoint("/api/login").to_url()?;
        let response = self
            .request(Method::POST, url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<LoginResponse> = serde_json::from_str(&body).ok();

        let token = parsed
            .as_ref()
            .filter(|r| status.is_success() && (r.success || r.token.is_some()))
            .and_then(|r| r.token.clone())
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => {
                tracing::info!("login succeeded");
                let token = Token::new(token);
                self.set_token(Some(token.clone()));
                Ok(token)
            }
            None => {
                let message = parsed
                    .and_then(|r| r.message)
                    .unwrap_or_else(|| LOGIN_FAILED.to_string());
                tracing::warn!(%status, "login rejected");
                Err(ApiError::Backend { message })
            }
        }
    }

    pub fn logout(&mut self) {
        self.set_token(None);
    }
}
