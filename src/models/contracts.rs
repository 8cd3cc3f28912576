use serde::{Deserialize, Serialize};

/// One field of a contract form. The backend attaches arbitrary extra keys
/// (validation, widget hints...) that the front end does not interpret.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractsFormField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl ContractsFormField {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsForm {
    pub contracts_form_id: i64,
    pub name: String,
    #[serde(default)]
    pub form: Vec<ContractsFormField>,
    #[serde(default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsFormListItem {
    pub contracts_form_id: i64,
    pub name: String,
    #[serde(default)]
    pub file_id: Option<String>,
}
