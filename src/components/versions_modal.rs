use leptos::prelude::*;

use crate::api::http::ApiContext;
use crate::components::file_list::{format_date_es, format_file_size};
use crate::models::version::FileVersion;

/// Version-history modal: list the versions of a file, open one read-only,
/// or select exactly two and compare them.
#[component]
pub fn FileVersionsModal(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] file_id: Signal<String>,
    #[prop(into)] file_name: Signal<String>,
    on_close: Callback<()>,
    on_view_version: Callback<u32>,
    /// (original version, revised version)
    on_compare: Callback<(u32, u32)>,
) -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    // Version ids ticked for comparison, two at most.
    let selected = RwSignal::new(Vec::<String>::new());

    let versions = LocalResource::new(move || {
        let ctx = ctx.clone();
        let open = is_open.get();
        let file_id = file_id.get();
        async move {
            if !open || file_id.is_empty() {
                return Ok(Vec::new());
            }
            ctx.get_file_history(&file_id).await
        }
    });

    Effect::new(move |_| {
        if is_open.get() {
            selected.set(Vec::new());
        }
    });

    let toggle_selection = move |version_id: String| {
        selected.update(|ids| {
            if let Some(pos) = ids.iter().position(|id| *id == version_id) {
                ids.remove(pos);
            } else if ids.len() < 2 {
                ids.push(version_id);
            }
        });
    };

    let compare_selected = move |versions: &[FileVersion]| {
        let ids = selected.get_untracked();
        if ids.len() != 2 {
            return;
        }
        let first = versions.iter().find(|v| v.id == ids[0]);
        let second = versions.iter().find(|v| v.id == ids[1]);
        if let (Some(first), Some(second)) = (first, second) {
            on_compare.run((first.version, second.version));
            on_close.run(());
        }
    };

    view! {
        {move || {
            (is_open.get()).then(|| view! {
                <div class="modal-backdrop">
                    <div class="modal modal-wide">
                        <div class="modal-header">
                            <div>
                                <h2>"Historial de Versiones"</h2>
                                <p class="subtitle">{file_name}</p>
                            </div>
                            <button class="btn btn-ghost" on:click=move |_| on_close.run(())>"✕"</button>
                        </div>

                        <div class="modal-body">
                            {move || {
                                match versions.get() {
                                    None => view! {
                                        <div class="modal-loading">
                                            <span class="loading loading-spinner loading-lg"></span>
                                        </div>
                                    }
                                        .into_any(),
                                    Some(result) => match &result {
                                        Err(err) => view! {
                                            <div class="alert alert-error"><p>{err.to_string()}</p></div>
                                        }
                                            .into_any(),
                                        Ok(list) if list.is_empty() => view! {
                                            <div class="modal-empty">
                                                <p>"No hay versiones disponibles"</p>
                                            </div>
                                        }
                                            .into_any(),
                                        Ok(list) => {
                                            let list = list.clone();
                                            let rows = list.clone();
                                            view! {
                                                <div>
                                                    <p class="hint">
                                                        "Selecciona dos versiones para compararlas"
                                                    </p>
                                                    <ul class="version-list">
                                                        {rows
                                                            .into_iter()
                                                            .map(|version| {
                                                                let id = version.id.clone();
                                                                let toggle_id = id.clone();
                                                                let number = version.version;
                                                                view! {
                                                                    <li class="version-row">
                                                                        <input
                                                                            type="checkbox"
                                                                            prop:checked=move || selected.get().contains(&id)
                                                                            on:change=move |_| toggle_selection(toggle_id.clone())
                                                                        />
                                                                        <div class="version-info">
                                                                            <span class="version-number">{format!("v{number}")}</span>
                                                                            <span>{format_file_size(version.file_size)}</span>
                                                                            <span>{version.uploaded_by_name.clone()}</span>
                                                                            <span>{format_date_es(&version.created_at)}</span>
                                                                            {version.changes.clone().map(|changes| view! {
                                                                                <span class="version-changes">{changes}</span>
                                                                            })}
                                                                        </div>
                                                                        <button
                                                                            class="btn btn-sm"
                                                                            title="Ver esta versión"
                                                                            on:click=move |_| {
                                                                                on_view_version.run(number);
                                                                                on_close.run(());
                                                                            }
                                                                        >
                                                                            "Ver"
                                                                        </button>
                                                                    </li>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                    <div class="modal-footer">
                                                        <button
                                                            class="btn btn-primary"
                                                            prop:disabled=move || selected.get().len() != 2
                                                            on:click=move |_| compare_selected(&list)
                                                        >
                                                            "Comparar seleccionadas"
                                                        </button>
                                                    </div>
                                                </div>
                                            }
                                                .into_any()
                                        }
                                    },
                                }
                            }}
                        </div>
                    </div>
                </div>
            })
        }}
    }
}
