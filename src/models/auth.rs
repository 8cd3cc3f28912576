use serde::Serialize;

/// Credentials for `POST auth/sign_in`. The backend answers with a
/// `sessionId` cookie; no token is handled client-side.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
