use reqwest::Method;

use crate::api::http::ApiContext;
use crate::error::AppError;
use crate::models::auth::LoginCredentials;

impl ApiContext {
    /// `POST auth/sign_in`. On success the backend sets the session cookie;
    /// nothing is returned to store client-side.
    pub async fn sign_in(&self, credentials: &LoginCredentials) -> Result<(), AppError> {
        self.send_ok(
            self.auth_request(Method::POST, "auth/sign_in")
                .json(credentials),
        )
        .await
        .map_err(|err| match err {
            // A 401 here is bad credentials, not an expired session.
            AppError::Unauthorized => AppError::Backend {
                status: 401,
                message: "Error al iniciar sesión".into(),
            },
            other => other,
        })
    }

    /// `POST auth/logout`, best-effort: a failed logout never blocks leaving.
    pub async fn logout(&self) {
        if let Err(err) = self.send_ok(self.auth_request(Method::POST, "auth/logout")).await {
            tracing::warn!("error al cerrar sesión: {err}");
        }
    }
}
