use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// The request never produced an HTTP response (DNS, connection, CORS...).
    #[error("Error de red: {0}")]
    Network(String),

    /// The backend answered with a non-success status. The message is the
    /// backend's own text when it sent one, else a generic fallback.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// 401 from the files backend. Callers redirect to the login route.
    #[error("Sesión expirada o no válida")]
    Unauthorized,

    /// The external editor reported an error event or failed to construct.
    #[error("Error en el editor: {0}")]
    Editor(String),

    /// The editor bootstrap script could not be loaded.
    #[error("Error al cargar el script del editor: {0}")]
    ScriptLoad(String),

    #[error("{0}")]
    Internal(String),
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}
