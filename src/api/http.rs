use std::sync::Arc;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::session::SessionStore;

/// Header carrying the tenant on every files-domain request.
pub const TENANT_HEADER: &str = "tenant-id";

const FALLBACK_ERROR: &str = "Error de comunicación con el servidor";

/// Everything an outbound request needs: the two backend base URLs, the
/// shared HTTP client and the session/tenant store. Passed down through the
/// component tree instead of living in globals.
#[derive(Clone)]
pub struct ApiContext {
    auth_base: String,
    files_base: String,
    http: reqwest::Client,
    session: Arc<dyn SessionStore>,
}

impl ApiContext {
    pub fn new(
        auth_base: impl Into<String>,
        files_base: impl Into<String>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            auth_base: auth_base.into().trim_end_matches('/').to_string(),
            files_base: files_base.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
        }
    }

    /// Base URLs are public build-time configuration; the WASM bundle cannot
    /// read server env at runtime.
    pub fn from_build_env(session: Arc<dyn SessionStore>) -> Self {
        Self::new(
            option_env!("LEGAJO_AUTH_API_URL").unwrap_or("http://localhost:4000"),
            option_env!("LEGAJO_FILES_API_URL").unwrap_or("http://localhost:4100"),
            session,
        )
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/{}", self.auth_base, path.trim_start_matches('/'))
    }

    pub(crate) fn files_url(&self, path: &str) -> String {
        format!("{}/{}", self.files_base, path.trim_start_matches('/'))
    }

    /// A request against the auth backend, cookie-credentialed.
    pub(crate) fn auth_request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        with_credentials(self.http.request(method, self.auth_url(path)))
    }

    /// A request against the files backend: cookie-credentialed and carrying
    /// the tenant header whenever a tenant is configured.
    pub(crate) fn files_request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let mut builder = with_credentials(self.http.request(method, self.files_url(path)));
        if let Some(tenant_id) = self.session.tenant_id() {
            builder = builder.header(TENANT_HEADER, tenant_id);
        }
        builder
    }

    /// Send, check the status, decode the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = check_status(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Internal(format!("respuesta inesperada del servidor: {e}")))
    }

    /// Send and check the status, discarding any body.
    pub(crate) async fn send_ok(&self, builder: RequestBuilder) -> Result<(), AppError> {
        check_status(builder.send().await?).await.map(|_| ())
    }

    /// Send, check the status, return the raw body bytes.
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>, AppError> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Browser requests must send the backend's session cookie cross-origin; on
/// native targets reqwest handles cookies through its own jar.
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    #[cfg(target_arch = "wasm32")]
    {
        builder.fetch_credentials_include()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        builder
    }
}

/// Map a non-success response to the error the UI shows. The backend's own
/// message (under `message` or `error`) is surfaced verbatim when present.
async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized);
    }

    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| backend_message(&body))
        .unwrap_or_else(|| format!("{FALLBACK_ERROR} ({})", status.as_u16()));

    Err(AppError::Backend {
        status: status.as_u16(),
        message,
    })
}

fn backend_message(body: &serde_json::Value) -> Option<String> {
    for key in ["message", "error"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_prefers_message_key() {
        let body = serde_json::json!({ "message": "sin permisos", "error": "forbidden" });
        assert_eq!(backend_message(&body).as_deref(), Some("sin permisos"));
    }

    #[test]
    fn backend_message_falls_back_to_error_key() {
        let body = serde_json::json!({ "error": "archivo no encontrado" });
        assert_eq!(backend_message(&body).as_deref(), Some("archivo no encontrado"));
    }

    #[test]
    fn backend_message_ignores_non_strings() {
        let body = serde_json::json!({ "message": { "code": 3 } });
        assert_eq!(backend_message(&body), None);
    }

    #[test]
    fn base_urls_are_normalized() {
        let ctx = ApiContext::new(
            "https://auth.example/",
            "https://files.example",
            Arc::new(crate::session::MemorySession::default()),
        );
        assert_eq!(ctx.auth_url("auth/sign_in"), "https://auth.example/auth/sign_in");
        assert_eq!(ctx.files_url("/files"), "https://files.example/files");
    }
}
