use crate::models::contracts::ContractsFormField;

/// A placeholder the user can insert into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderField {
    /// Token body, without the `{{ }}` wrapping.
    pub key: String,
    pub label: String,
    pub category: Option<String>,
}

/// One row of the contract-template placeholder table: the tokens a single
/// form field produces, already wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRow {
    pub field_id: String,
    pub label: String,
    pub by_title: Option<String>,
    pub by_id: Option<String>,
}

pub const CATEGORY_FORM_FIELDS: &str = "Campos del formulario";
pub const CATEGORY_BY_UUID: &str = "Por UUID (opcional)";

/// The fixed placeholder set every document template can use, independent of
/// any contract form.
pub const BASE_PLACEHOLDERS: &[(&str, &str, &str)] = &[
    ("client_name", "Nombre del Cliente", "Cliente"),
    ("client_email", "Email del Cliente", "Cliente"),
    ("client_phone", "Teléfono del Cliente", "Cliente"),
    ("start_date", "Fecha de Inicio", "Fechas"),
    ("end_date", "Fecha de Fin", "Fechas"),
    ("contract_date", "Fecha del Contrato", "Fechas"),
    ("amount", "Monto", "Financiero"),
    ("currency", "Moneda", "Financiero"),
    ("contract_number", "Número de Contrato", "Contrato"),
    ("signature_date", "Fecha de Firma", "Contrato"),
];

pub fn base_placeholders() -> Vec<PlaceholderField> {
    BASE_PLACEHOLDERS
        .iter()
        .map(|(key, label, category)| PlaceholderField {
            key: (*key).to_string(),
            label: (*label).to_string(),
            category: Some((*category).to_string()),
        })
        .collect()
}

/// Wrap a placeholder key as the token inserted into documents.
pub fn token(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

/// Normalize a human-readable title into a placeholder slug: diacritics
/// stripped, lower-cased, every run of non-alphanumerics collapsed into one
/// underscore, leading and trailing underscores trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let c = strip_accent(c);
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

/// Fold the accented Latin letters the backend's locales produce into their
/// ASCII base letter. Anything else passes through untouched.
fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

/// Derive the placeholder list for a form's field sequence.
///
/// Each field contributes a title-based key and an id-based key when the
/// respective source value is present. Output order follows input order and
/// colliding slugs are kept as-is; the document author resolves ambiguity.
pub fn build_placeholders(fields: &[ContractsFormField]) -> Vec<PlaceholderField> {
    let mut placeholders = Vec::new();

    for field in fields {
        if !field.title.is_empty() {
            placeholders.push(PlaceholderField {
                key: format!("form_{}", slugify(&field.title)),
                label: field.title.clone(),
                category: Some(CATEGORY_FORM_FIELDS.to_string()),
            });
        }

        if !field.id.is_empty() {
            let label = if field.title.is_empty() {
                &field.id
            } else {
                &field.title
            };
            placeholders.push(PlaceholderField {
                key: format!("field_{}", field.id.replace('-', "_")),
                label: format!("{label} (UUID)"),
                category: Some(CATEGORY_BY_UUID.to_string()),
            });
        }
    }

    placeholders
}

/// Table rows for the contract-template page, tokens pre-wrapped.
pub fn build_placeholder_rows(fields: &[ContractsFormField]) -> Vec<PlaceholderRow> {
    fields
        .iter()
        .map(|field| PlaceholderRow {
            field_id: field.id.clone(),
            label: field.title.clone(),
            by_title: (!field.title.is_empty())
                .then(|| token(&format!("form_{}", slugify(&field.title)))),
            by_id: (!field.id.is_empty())
                .then(|| token(&format!("field_{}", field.id.replace('-', "_")))),
        })
        .collect()
}

/// Group placeholders by category, preserving first-appearance order of both
/// categories and fields. Uncategorized fields land under "Otros".
pub fn group_by_category(fields: &[PlaceholderField]) -> Vec<(String, Vec<PlaceholderField>)> {
    let mut groups: Vec<(String, Vec<PlaceholderField>)> = Vec::new();

    for field in fields {
        let category = field.category.clone().unwrap_or_else(|| "Otros".to_string());
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, members)) => members.push(field.clone()),
            None => groups.push((category, vec![field.clone()])),
        }
    }

    groups
}
