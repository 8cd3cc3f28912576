use leptos::prelude::*;

use crate::api::http::ApiContext;
use crate::browser::SelectedFile;
use crate::components::file_list::format_file_size;
use crate::models::file::UploadFileMetadata;

/// Client-side cap, mirroring the backend's limit.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Modal for uploading a file from disk.
#[component]
pub fn UploadFileModal(
    #[prop(into)] is_open: Signal<bool>,
    on_close: Callback<()>,
    /// Fired after a successful upload so the caller reloads the list.
    on_success: Callback<()>,
) -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let selected = RwSignal::new_local(None::<SelectedFile>);
    let error = RwSignal::new(None::<String>);

    let handle_file_select = move |ev: leptos::ev::Event| {
        if let Some(file) = SelectedFile::from_change_event(&ev) {
            if file.size > MAX_UPLOAD_BYTES {
                error.set(Some("El archivo no debe superar los 50MB".into()));
                return;
            }
            selected.set(Some(file));
            error.set(None);
        }
    };

    let upload_action = Action::new_local(move |file: &SelectedFile| {
        let ctx = ctx.clone();
        let file = file.clone();
        async move {
            let content = file.bytes().await?;
            ctx.upload_file(&file.name, &file.mime, content, &UploadFileMetadata::default())
                .await
        }
    });

    let is_uploading = upload_action.pending();

    Effect::new(move |_| {
        let Some(result) = upload_action.value().get() else {
            return;
        };
        match result {
            Ok(_) => {
                selected.set(None);
                error.set(None);
                on_success.run(());
                on_close.run(());
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let handle_upload = move |_| {
        if let Some(file) = selected.get_untracked() {
            error.set(None);
            upload_action.dispatch_local(file);
        }
    };

    let handle_close = move |_| {
        if !is_uploading.get_untracked() {
            selected.set(None);
            error.set(None);
            on_close.run(());
        }
    };

    view! {
        {move || {
            (is_open.get()).then(|| view! {
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-header">
                            <h2>"Subir Archivo"</h2>
                            <button class="btn btn-ghost" on:click=handle_close prop:disabled=is_uploading>"✕"</button>
                        </div>

                        <div class="modal-body">
                            {move || {
                                error.get().map(|message| view! {
                                    <div class="alert alert-error"><p>{message}</p></div>
                                })
                            }}

                            {move || {
                                match selected.get() {
                                    None => view! {
                                        <label class="dropzone">
                                            <p>"Haz clic para seleccionar un archivo"</p>
                                            <p class="hint">"Tamaño máximo: 50MB"</p>
                                            <input type="file" class="hidden" on:change=handle_file_select />
                                        </label>
                                    }
                                        .into_any(),
                                    Some(file) => view! {
                                        <div class="selected-file">
                                            <p class="file-name">{file.name.clone()}</p>
                                            <p class="hint">{format_file_size(file.size)}</p>
                                            <button
                                                class="btn btn-ghost btn-sm"
                                                on:click=move |_| selected.set(None)
                                                prop:disabled=is_uploading
                                            >
                                                "Elegir otro archivo"
                                            </button>
                                        </div>
                                    }
                                        .into_any(),
                                }
                            }}
                        </div>

                        <div class="modal-footer">
                            <button class="btn" on:click=handle_close prop:disabled=is_uploading>
                                "Cancelar"
                            </button>
                            <button
                                class="btn btn-primary"
                                on:click=handle_upload
                                prop:disabled=move || is_uploading.get() || selected.read().is_none()
                            >
                                {move || if is_uploading.get() { "Subiendo..." } else { "Subir Archivo" }}
                            </button>
                        </div>
                    </div>
                </div>
            })
        }}
    }
}
