use reqwest::Method;

use crate::api::http::ApiContext;
use crate::error::AppError;
use crate::models::contracts::{ContractsForm, ContractsFormListItem};
use crate::models::file::FileMetadata;

impl ApiContext {
    /// `GET /contracts-forms`. Deployed backends disagree on the list
    /// envelope, so accept every shape seen in the wild.
    pub async fn list_contracts_forms(&self) -> Result<Vec<ContractsFormListItem>, AppError> {
        let body: serde_json::Value = self
            .send_json(
                self.files_request(Method::GET, "/contracts-forms")
                    .query(&[("limit", "0")]),
            )
            .await?;
        Ok(extract_form_list(body))
    }

    /// `GET /contracts-forms/:id`.
    pub async fn get_contracts_form(&self, form_id: i64) -> Result<ContractsForm, AppError> {
        self.send_json(self.files_request(Method::GET, &format!("/contracts-forms/{form_id}")))
            .await
    }

    /// Associate a template file with a contract form (or clear it with
    /// `None`). The backend route for this association is not final; if it
    /// moves (e.g. to `/contracts-forms/:id/template`), adjust only this call.
    pub async fn set_form_template(
        &self,
        form_id: i64,
        file_id: Option<&str>,
    ) -> Result<ContractsForm, AppError> {
        self.send_json(
            self.files_request(Method::PATCH, &format!("/contracts-forms/{form_id}"))
                .json(&serde_json::json!({ "fileId": file_id })),
        )
        .await
    }

    /// `POST /contracts/:id/generate-doc`: render the contract's template
    /// with its form data into a new file.
    pub async fn generate_contract_document(
        &self,
        contract_id: &str,
    ) -> Result<FileMetadata, AppError> {
        self.send_json(
            self.files_request(Method::POST, &format!("/contracts/{contract_id}/generate-doc")),
        )
        .await
    }
}

/// Pull the form list out of whichever envelope the backend used: a bare
/// array, or one nested under `items`, `data` or `results`.
fn extract_form_list(body: serde_json::Value) -> Vec<ContractsFormListItem> {
    let candidates = [&body]
        .into_iter()
        .chain(["items", "data", "results"].iter().filter_map(|k| body.get(*k)));

    for candidate in candidates {
        if candidate.is_array() {
            return serde_json::from_value(candidate.clone()).unwrap_or_default();
        }
    }

    tracing::warn!("formato inesperado de respuesta en /contracts-forms");
    Vec::new()
}
