use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file record as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub file_name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub uploaded_by_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_contract: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileMetadata>,
}

/// Optional flags attached to an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadFileMetadata {
    pub is_template: Option<bool>,
    pub is_contract: Option<bool>,
    pub contract_id: Option<String>,
    pub is_public: Option<bool>,
}

/// Server-side list filters for `GET /files`.
#[derive(Debug, Clone, Default)]
pub struct ListFilesFilter {
    pub is_contract: Option<String>,
    pub contract_id: Option<String>,
    pub is_public: Option<String>,
}

impl ListFilesFilter {
    /// Query pairs for the set filters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.is_contract {
            pairs.push(("isContract", v.clone()));
        }
        if let Some(v) = &self.contract_id {
            pairs.push(("contractId", v.clone()));
        }
        if let Some(v) = &self.is_public {
            pairs.push(("isPublic", v.clone()));
        }
        pairs
    }
}

/// Body for `POST /files/create-blank`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlankFile {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_contract: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl CreateBlankFile {
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            is_template: None,
            is_contract: None,
            contract_id: None,
            is_public: None,
        }
    }
}

/// Options for `POST /files/:id/duplicate`. When both are `None` the server
/// decides the copy's name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignedUrlResponse {
    pub url: String,
}
