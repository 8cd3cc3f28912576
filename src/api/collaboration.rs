use reqwest::Method;

use crate::api::http::ApiContext;
use crate::error::AppError;
use crate::models::collaboration::{
    CollaborationSession, SessionListResponse, StartCollaborationRequest,
    StartCollaborationResponse,
};

impl ApiContext {
    /// `POST /collaboration/start`: correlate this tab's edit session with
    /// the backend.
    pub async fn start_collaboration(
        &self,
        request: &StartCollaborationRequest,
    ) -> Result<StartCollaborationResponse, AppError> {
        self.send_json(
            self.files_request(Method::POST, "/collaboration/start")
                .json(request),
        )
        .await
    }

    /// `GET /collaboration/sessions/:fileId`.
    pub async fn get_active_sessions(
        &self,
        file_id: &str,
    ) -> Result<Vec<CollaborationSession>, AppError> {
        let response: SessionListResponse = self
            .send_json(
                self.files_request(Method::GET, &format!("/collaboration/sessions/{file_id}")),
            )
            .await?;
        Ok(response.sessions)
    }

    /// `POST /collaboration/sessions/:id/activity`. Failures are swallowed so
    /// a heartbeat never interrupts editing.
    pub async fn update_session_activity(&self, session_id: &str) {
        let result = self
            .send_ok(self.files_request(
                Method::POST,
                &format!("/collaboration/sessions/{session_id}/activity"),
            ))
            .await;
        if let Err(err) = result {
            tracing::warn!("no se pudo actualizar la actividad de la sesión: {err}");
        }
    }

    /// `DELETE /collaboration/sessions/:id`. Failures are swallowed so page
    /// teardown never blocks on the network.
    pub async fn end_collaboration(&self, session_id: &str) {
        let result = self
            .send_ok(
                self.files_request(
                    Method::DELETE,
                    &format!("/collaboration/sessions/{session_id}"),
                ),
            )
            .await;
        if let Err(err) = result {
            tracing::warn!("no se pudo cerrar la sesión de colaboración: {err}");
        }
    }
}
