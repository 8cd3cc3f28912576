use serde::Deserialize;

/// Server-issued configuration bundle for one editor session.
///
/// The `config` object is forwarded verbatim to the external editor (the
/// client only attaches its event hooks), so it stays an opaque JSON value.
/// Everything the page itself needs is lifted into typed fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorDescriptor {
    #[serde(default)]
    pub success: bool,
    pub config: serde_json::Value,
    /// URL of the editor's bootstrap script (`api.js`).
    #[serde(default)]
    pub editor_api_url: String,
    /// Collaboration session opened by the backend for this edit, if any.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub file_info: Option<EditorFileInfo>,
    #[serde(default)]
    pub user: Option<EditorUser>,
    #[serde(default)]
    pub is_comparison: Option<bool>,
    #[serde(default)]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub is_historical_version: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorFileInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub original_version: Option<u32>,
    #[serde(default)]
    pub revised_version: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl EditorDescriptor {
    /// The editor product requires `document.key` to be unique per document
    /// content; it doubles as the single-flight initialization key.
    pub fn document_key(&self) -> Option<&str> {
        self.config
            .get("document")
            .and_then(|d| d.get("key"))
            .and_then(|k| k.as_str())
    }

    pub fn file_name(&self) -> &str {
        self.file_info
            .as_ref()
            .map(|i| i.file_name.as_str())
            .unwrap_or("Editor")
    }

    pub fn is_comparison(&self) -> bool {
        self.is_comparison.unwrap_or(false)
    }

    pub fn is_historical_version(&self) -> bool {
        self.is_historical_version.unwrap_or(false)
    }

    /// Whether placeholder insertion and editing must be disabled.
    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false) || self.is_historical_version() || self.is_comparison()
    }
}
