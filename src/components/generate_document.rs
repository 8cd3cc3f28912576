use leptos::prelude::*;

use crate::api::http::ApiContext;

/// Button that asks the backend to render a contract's template with its
/// form data into a new document, then opens the result in the editor.
#[component]
pub fn GenerateDocumentButton(
    #[prop(into)] contract_id: Signal<Option<String>>,
    /// Receives the generated file's id.
    on_generated: Callback<String>,
) -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let error = RwSignal::new(None::<String>);

    let generate_action = Action::new_local({
        let ctx = ctx.clone();
        move |contract_id: &String| {
            let ctx = ctx.clone();
            let contract_id = contract_id.clone();
            async move { ctx.generate_contract_document(&contract_id).await }
        }
    });
    let is_generating = generate_action.pending();

    Effect::new(move |_| {
        let Some(result) = generate_action.value().get() else {
            return;
        };
        match result {
            Ok(file) => {
                error.set(None);
                on_generated.run(file.id);
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let handle_click = move |_| {
        if let Some(id) = contract_id.get_untracked() {
            error.set(None);
            generate_action.dispatch_local(id);
        }
    };

    view! {
        <div class="generate-document">
            <button
                class="btn btn-primary"
                on:click=handle_click
                prop:disabled=move || is_generating.get() || contract_id.read().is_none()
            >
                {move || if is_generating.get() { "Generando documento..." } else { "Generar Documento" }}
            </button>
            {move || {
                error.get().map(|message| view! {
                    <p class="error">{message}</p>
                })
            }}
        </div>
    }
}
