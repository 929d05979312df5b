use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response, StatusCode, Url,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{domain::BackendOutcome, ApiError, ApiUrl, Token};

pub const DEFAULT_API_URL: &str = "https://processador-relatorios-ia.onrender.com";

const GENERIC_FAILURE: &str = "Erro na requisição";

/// Typed client for the patrol and occurrence backend.
///
/// Every request carries `Content-Type: application/json` and, once a token
/// is set, `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct RondaClient {
    client: Client,
    base_url: ApiUrl,
    token: Option<Token>,
}

impl RondaClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::new(),
            base_url: ApiUrl::parse(base_url)?,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn set_token(&mut self, token: Option<Token>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    pub(crate) fn endpoint(&self, path: &str) -> ApiUrl {
        self.base_url.append_path(path)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token.as_str())),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses to [`ApiError`].
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(call = call_name, %status, "response received");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            StatusCode::METHOD_NOT_ALLOWED => Err(ApiError::MethodNotAllowed),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                let message = error_message(&body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
                Err(ApiError::Status { status, message })
            }
            _ => Ok(response),
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::Parse(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    /// Like [`Self::get_json`], but turns a `sucesso: false` body into
    /// [`ApiError::Backend`].
    pub(crate) async fn get_checked<T: DeserializeOwned + BackendOutcome>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let outcome: T = self.get_json(request, call_name).await?;
        if !outcome.sucesso() {
            let message = outcome.message().unwrap_or(GENERIC_FAILURE).to_string();
            tracing::debug!(call = call_name, %message, "backend reported failure");
            return Err(ApiError::Backend { message });
        }
        Ok(outcome)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}
