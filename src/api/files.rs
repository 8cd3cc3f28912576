use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::api::http::ApiContext;
use crate::editor::request::EditorRequest;
use crate::error::AppError;
use crate::models::editor::EditorDescriptor;
use crate::models::file::{
    CreateBlankFile, DuplicateOptions, FileListResponse, FileMetadata, ListFilesFilter,
    SignedUrlResponse, UploadFileMetadata,
};
use crate::models::version::{FileVersion, FileVersionHistory};

impl ApiContext {
    /// `GET /files`, optionally filtered server-side.
    pub async fn list_files(&self, filter: &ListFilesFilter) -> Result<FileListResponse, AppError> {
        self.send_json(
            self.files_request(Method::GET, "/files")
                .query(&filter.query_pairs()),
        )
        .await
    }

    /// `POST /files/upload`: multipart with the file under `file` and the
    /// optional flags as plain text fields.
    pub async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        content: Vec<u8>,
        metadata: &UploadFileMetadata,
    ) -> Result<FileMetadata, AppError> {
        // Browsers report an empty type for unknown extensions.
        let mime_type = if mime_type.is_empty() {
            "application/octet-stream"
        } else {
            mime_type
        };
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| AppError::Internal(format!("tipo MIME no válido: {e}")))?;

        let mut form = Form::new().part("file", part);
        if let Some(is_template) = metadata.is_template {
            form = form.text("isTemplate", is_template.to_string());
        }
        if let Some(is_contract) = metadata.is_contract {
            form = form.text("isContract", is_contract.to_string());
        }
        if let Some(contract_id) = &metadata.contract_id {
            form = form.text("contractId", contract_id.clone());
        }
        if let Some(is_public) = metadata.is_public {
            form = form.text("isPublic", is_public.to_string());
        }

        self.send_json(self.files_request(Method::POST, "/files/upload").multipart(form))
            .await
    }

    /// `POST /files/create-blank`.
    pub async fn create_blank_file(&self, payload: &CreateBlankFile) -> Result<FileMetadata, AppError> {
        self.send_json(
            self.files_request(Method::POST, "/files/create-blank")
                .json(payload),
        )
        .await
    }

    /// `GET /files/:id`.
    pub async fn get_file_metadata(&self, file_id: &str) -> Result<FileMetadata, AppError> {
        self.send_json(self.files_request(Method::GET, &format!("/files/{file_id}")))
            .await
    }

    /// `GET /files/:id/download`: the raw content. The caller materializes it
    /// as a browser download.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, AppError> {
        self.send_bytes(self.files_request(Method::GET, &format!("/files/{file_id}/download")))
            .await
    }

    /// `DELETE /files/:id`.
    pub async fn delete_file(&self, file_id: &str) -> Result<(), AppError> {
        self.send_ok(self.files_request(Method::DELETE, &format!("/files/{file_id}")))
            .await
    }

    /// `POST /files/:id/duplicate`. With empty options the server picks the
    /// copy's name.
    pub async fn duplicate_file(
        &self,
        file_id: &str,
        options: &DuplicateOptions,
    ) -> Result<FileMetadata, AppError> {
        self.send_json(
            self.files_request(Method::POST, &format!("/files/{file_id}/duplicate"))
                .json(options),
        )
        .await
    }

    /// `GET /files/:id/signed-url`.
    pub async fn get_signed_url(&self, file_id: &str) -> Result<String, AppError> {
        let response: SignedUrlResponse = self
            .send_json(self.files_request(Method::GET, &format!("/files/{file_id}/signed-url")))
            .await?;
        Ok(response.url)
    }

    /// `GET /files/:id/history`, most recent version first.
    pub async fn get_file_history(&self, file_id: &str) -> Result<Vec<FileVersion>, AppError> {
        let history: FileVersionHistory = self
            .send_json(self.files_request(Method::GET, &format!("/files/{file_id}/history")))
            .await?;
        Ok(history.into_versions())
    }

    /// Fetch the editor descriptor for whichever session shape the route
    /// parameters selected: comparison wins over a historical version, which
    /// wins over a plain open.
    pub async fn fetch_editor_descriptor(
        &self,
        file_id: &str,
        request: &EditorRequest,
    ) -> Result<EditorDescriptor, AppError> {
        match request {
            EditorRequest::Compare { original, revised } => {
                self.send_json(self.files_request(
                    Method::GET,
                    &format!("/onlyoffice/compare/{file_id}/{original}/{revised}"),
                ))
                .await
            }
            EditorRequest::Version(version) => {
                self.send_json(self.files_request(
                    Method::GET,
                    &format!("/onlyoffice/open-file/{file_id}/version/{version}"),
                ))
                .await
            }
            EditorRequest::Open(mode) => {
                self.send_json(
                    self.files_request(Method::GET, &format!("/onlyoffice/open-file/{file_id}"))
                        .query(&[("mode", mode.as_str())]),
                )
                .await
            }
        }
    }
}
