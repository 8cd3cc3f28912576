use leptos::prelude::*;

use crate::api::http::ApiContext;

/// Developer escape hatch: paste a `sessionId` cookie value obtained out of
/// band (e.g. from Postman) to test against a real backend locally.
#[component]
pub fn ManualSession() -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let session = StoredValue::new_local(ctx.session().clone());
    let show_modal = RwSignal::new(false);
    let session_input = RwSignal::new(String::new());
    let current_session = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let stored = session.with_value(|s| s.manual_session());
        if let Some(value) = &stored {
            // Re-assert the cookie so a cleared browser still works.
            session.with_value(|s| s.set_manual_session(value));
        }
        current_session.set(stored);
    });

    let handle_save = move |_| {
        let value = session_input.get_untracked();
        let value = value.trim().to_string();
        if !value.is_empty() {
            session.with_value(|s| s.set_manual_session(&value));
            current_session.set(Some(value));
            show_modal.set(false);
            crate::browser::reload_page();
        }
    };

    let handle_clear = move |_| {
        session.with_value(|s| s.clear_manual_session());
        current_session.set(None);
        crate::browser::hard_redirect("/login");
    };

    view! {
        <button
            class="manual-session-toggle"
            title="Configurar Session ID manual"
            on:click=move |_| show_modal.set(true)
        >
            "🍪"
        </button>

        {move || {
            (show_modal.get()).then(|| view! {
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-header">
                            <h2>"Session ID Manual (Desarrollo)"</h2>
                            <button class="btn btn-ghost" on:click=move |_| show_modal.set(false)>"✕"</button>
                        </div>

                        <div class="modal-body">
                            {move || {
                                match current_session.get() {
                                    Some(session_value) => {
                                        let shown: String = session_value.chars().take(50).collect();
                                        view! {
                                            <div class="alert alert-success">
                                                <p>"Session ID Activo"</p>
                                                <p class="mono">{format!("{shown}...")}</p>
                                            </div>
                                        }
                                            .into_any()
                                    }
                                    None => view! {
                                        <div class="alert alert-warning">
                                            <p>
                                                "No hay session ID configurado. Pega tu cookie sessionId de Postman o del navegador."
                                            </p>
                                        </div>
                                    }
                                        .into_any(),
                                }
                            }}

                            <label>"Session ID Cookie"</label>
                            <textarea
                                rows="6"
                                placeholder="Pega aquí el valor de la cookie sessionId..."
                                prop:value=session_input
                                on:input=move |ev| session_input.set(event_target_value(&ev))
                            ></textarea>
                            <p class="hint">"Ejemplo: eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."</p>
                        </div>

                        <div class="modal-footer">
                            {move || {
                                current_session.read().is_some().then(|| view! {
                                    <button class="btn btn-danger" on:click=handle_clear>
                                        "Limpiar Session"
                                    </button>
                                })
                            }}
                            <button class="btn" on:click=move |_| show_modal.set(false)>
                                "Cancelar"
                            </button>
                            <button
                                class="btn btn-primary"
                                on:click=handle_save
                                prop:disabled=move || session_input.read().trim().is_empty()
                            >
                                "Guardar y Recargar"
                            </button>
                        </div>
                    </div>
                </div>
            })
        }}
    }
}
