use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission set the backend records for an active edit session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPermissions {
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub download: bool,
    #[serde(default)]
    pub comment: bool,
    #[serde(default)]
    pub fill_forms: bool,
    #[serde(default)]
    pub review: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCollaborationRequest {
    pub file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<SessionPermissions>,
}

impl StartCollaborationRequest {
    pub fn for_file(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            user_id: None,
            user_name: None,
            permissions: None,
        }
    }
}

/// A collaboration session correlating a browser tab with the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationSession {
    pub id: String,
    pub file_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    #[serde(default)]
    pub permissions: SessionPermissions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCollaborationResponse {
    pub session_id: String,
    pub session: CollaborationSession,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<CollaborationSession>,
}
