use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::models::file::FileMetadata;

/// Human-readable size, matching what the product has always shown.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// `dd mmm yyyy, HH:MM` with Spanish month abbreviations.
pub fn format_date_es(date: &DateTime<Utc>) -> String {
    use chrono::{Datelike, Timelike};
    format!(
        "{:02} {} {}, {:02}:{:02}",
        date.day(),
        MONTHS_ES[date.month0() as usize],
        date.year(),
        date.hour(),
        date.minute()
    )
}

/// The dashboard's file table with its per-row actions.
#[component]
pub fn FileList(
    #[prop(into)] files: Signal<Vec<FileMetadata>>,
    on_edit: Callback<String>,
    /// (file id, file name)
    on_versions: Callback<(String, String)>,
    on_download: Callback<(String, String)>,
    on_duplicate: Callback<(String, String)>,
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="file-list">
            {move || {
                let files = files.get();
                if files.is_empty() {
                    view! {
                        <div class="file-list-empty">
                            <p>"No hay archivos todavía. Sube el primero."</p>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <table class="file-table">
                            <thead>
                                <tr>
                                    <th>"Nombre"</th>
                                    <th>"Tamaño"</th>
                                    <th>"Versión"</th>
                                    <th>"Subido por"</th>
                                    <th>"Actualizado"</th>
                                    <th>"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {files
                                    .into_iter()
                                    .map(|file| view! { <FileRow
                                        file=file
                                        on_edit=on_edit
                                        on_versions=on_versions
                                        on_download=on_download
                                        on_duplicate=on_duplicate
                                        on_delete=on_delete
                                    /> })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn FileRow(
    file: FileMetadata,
    on_edit: Callback<String>,
    on_versions: Callback<(String, String)>,
    on_download: Callback<(String, String)>,
    on_duplicate: Callback<(String, String)>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let id = file.id.clone();
    let name = file.file_name.clone();

    let edit_id = id.clone();
    let versions = (id.clone(), name.clone());
    let download = (id.clone(), name.clone());
    let duplicate = (id.clone(), name.clone());
    let delete_id = id.clone();

    view! {
        <tr>
            <td class="file-name">
                {name.clone()}
                {file
                    .is_template
                    .unwrap_or(false)
                    .then(|| view! { <span class="badge">"Plantilla"</span> })}
            </td>
            <td>{format_file_size(file.file_size)}</td>
            <td>{format!("v{}", file.version)}</td>
            <td>{file.uploaded_by_name.clone()}</td>
            <td>{format_date_es(&file.updated_at)}</td>
            <td class="file-actions">
                <button class="btn btn-sm" title="Editar"
                    on:click=move |_| on_edit.run(edit_id.clone())>
                    "Editar"
                </button>
                <button class="btn btn-sm" title="Historial de versiones"
                    on:click=move |_| on_versions.run(versions.clone())>
                    "Versiones"
                </button>
                <button class="btn btn-sm" title="Descargar"
                    on:click=move |_| on_download.run(download.clone())>
                    "Descargar"
                </button>
                <button class="btn btn-sm" title="Duplicar"
                    on:click=move |_| on_duplicate.run(duplicate.clone())>
                    "Duplicar"
                </button>
                <button class="btn btn-sm btn-danger" title="Eliminar"
                    on:click=move |_| on_delete.run(delete_id.clone())>
                    "Eliminar"
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_follow_product_format() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn dates_use_spanish_month_abbreviations() {
        let date = "2025-05-02T14:30:00Z".parse().unwrap();
        assert_eq!(format_date_es(&date), "02 may 2025, 14:30");
    }
}
