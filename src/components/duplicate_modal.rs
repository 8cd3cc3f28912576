use leptos::prelude::*;

use crate::models::file::DuplicateOptions;

/// The name the copy will get, previewed exactly as the server will name it:
/// a custom name wins, else the suffix is spliced before the extension, else
/// the server appends " (copia)".
pub fn duplicate_preview_name(
    file_name: &str,
    use_custom_name: bool,
    suffix: &str,
    new_name: &str,
) -> String {
    if use_custom_name && !new_name.trim().is_empty() {
        return new_name.trim().to_string();
    }

    let suffix = suffix.trim();
    if !use_custom_name && !suffix.is_empty() {
        return match file_name.rsplit_once('.') {
            Some((base, extension)) => format!("{base}_{suffix}.{extension}"),
            None => format!("{file_name}_{suffix}"),
        };
    }

    format!("{file_name} (copia)")
}

/// The request options matching the modal's current choice.
pub fn duplicate_options(use_custom_name: bool, suffix: &str, new_name: &str) -> DuplicateOptions {
    if use_custom_name {
        let new_name = new_name.trim();
        return DuplicateOptions {
            suffix: None,
            new_name: (!new_name.is_empty()).then(|| new_name.to_string()),
        };
    }

    let suffix = suffix.trim();
    DuplicateOptions {
        suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
        new_name: None,
    }
}

/// Modal for duplicating a file: keep the name with a suffix, or give the
/// copy a completely new name.
#[component]
pub fn DuplicateFileModal(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] file_id: Signal<String>,
    #[prop(into)] file_name: Signal<String>,
    on_close: Callback<()>,
    /// (file id, options); the caller performs the request and reloads.
    on_duplicate: Callback<(String, DuplicateOptions)>,
    #[prop(into)] is_loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let use_custom_name = RwSignal::new(false);
    let suffix = RwSignal::new(String::new());
    let new_name = RwSignal::new(String::new());

    let reset_form = move || {
        use_custom_name.set(false);
        suffix.set(String::new());
        new_name.set(String::new());
    };

    let preview = Memo::new(move |_| {
        duplicate_preview_name(
            &file_name.get(),
            use_custom_name.get(),
            &suffix.get(),
            &new_name.get(),
        )
    });

    let handle_close = move |_| {
        if !is_loading.get_untracked() {
            reset_form();
            on_close.run(());
        }
    };

    let handle_duplicate = move |_| {
        let options = duplicate_options(
            use_custom_name.get_untracked(),
            &suffix.get_untracked(),
            &new_name.get_untracked(),
        );
        on_duplicate.run((file_id.get_untracked(), options));
    };

    view! {
        {move || {
            (is_open.get()).then(|| view! {
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-header">
                            <div>
                                <h2>"Duplicar Archivo"</h2>
                                <p class="subtitle">{file_name}</p>
                            </div>
                            <button class="btn btn-ghost" on:click=handle_close prop:disabled=is_loading>"✕"</button>
                        </div>

                        <div class="modal-body">
                            <label class="option">
                                <input
                                    type="radio"
                                    prop:checked=move || !use_custom_name.get()
                                    on:change=move |_| use_custom_name.set(false)
                                    prop:disabled=is_loading
                                />
                                <div>
                                    <div class="option-title">"Agregar sufijo al nombre"</div>
                                    <input
                                        type="text"
                                        placeholder="ej: v2, Cliente_A, Revision"
                                        prop:value=suffix
                                        on:input=move |ev| suffix.set(event_target_value(&ev))
                                        prop:disabled=move || use_custom_name.get() || is_loading.get()
                                    />
                                    <p class="hint">"El nombre original se mantendrá con un sufijo agregado"</p>
                                </div>
                            </label>

                            <label class="option">
                                <input
                                    type="radio"
                                    prop:checked=use_custom_name
                                    on:change=move |_| use_custom_name.set(true)
                                    prop:disabled=is_loading
                                />
                                <div>
                                    <div class="option-title">"Nombre completo nuevo"</div>
                                    <input
                                        type="text"
                                        placeholder="NuevoNombre.docx"
                                        prop:value=new_name
                                        on:input=move |ev| new_name.set(event_target_value(&ev))
                                        prop:disabled=move || !use_custom_name.get() || is_loading.get()
                                    />
                                    <p class="hint">"Especifica un nombre completamente nuevo para la copia"</p>
                                </div>
                            </label>

                            <div class="preview">
                                <p>"Vista previa del nombre:"</p>
                                <p class="preview-name">{preview}</p>
                            </div>

                            {move || {
                                error.get().map(|message| view! {
                                    <div class="alert alert-error"><p>{message}</p></div>
                                })
                            }}
                        </div>

                        <div class="modal-footer">
                            <button class="btn" on:click=handle_close prop:disabled=is_loading>
                                "Cancelar"
                            </button>
                            <button class="btn btn-primary" on:click=handle_duplicate prop:disabled=is_loading>
                                {move || if is_loading.get() { "Duplicando..." } else { "Duplicar Archivo" }}
                            </button>
                        </div>
                    </div>
                </div>
            })
        }}
    }
}
