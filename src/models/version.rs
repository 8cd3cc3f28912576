use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One immutable entry in a file's version history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersion {
    pub id: String,
    pub version: u32,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub uploaded_by_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub changes: Option<String>,
}

/// Response of `GET /files/:id/history`.
///
/// Some backend versions list entries under `versions`, others under
/// `history`; accept both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersionHistory {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub current_version: Option<u32>,
    #[serde(default)]
    versions: Option<Vec<FileVersion>>,
    #[serde(default)]
    history: Option<Vec<FileVersion>>,
}

impl FileVersionHistory {
    /// The version list, most recent first, whichever key carried it.
    pub fn into_versions(self) -> Vec<FileVersion> {
        self.versions.or(self.history).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_under_versions_key() {
        let raw = serde_json::json!({
            "fileId": "f1",
            "currentVersion": 3,
            "versions": [
                { "id": "v3", "version": 3, "createdAt": "2025-05-02T10:00:00Z" },
                { "id": "v2", "version": 2, "createdAt": "2025-05-01T10:00:00Z" }
            ]
        });
        let parsed: FileVersionHistory = serde_json::from_value(raw).unwrap();
        let versions = parsed.into_versions();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, 3);
    }

    #[test]
    fn history_under_history_key() {
        let raw = serde_json::json!({
            "history": [
                { "id": "v1", "version": 1, "createdAt": "2025-05-01T10:00:00Z" }
            ]
        });
        let parsed: FileVersionHistory = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.into_versions().len(), 1);
    }

    #[test]
    fn history_with_neither_key_is_empty() {
        let parsed: FileVersionHistory = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(parsed.into_versions().is_empty());
    }
}
