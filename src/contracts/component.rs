use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::api::http::ApiContext;
use crate::browser::SelectedFile;
use crate::components::generate_document::GenerateDocumentButton;
use crate::error::AppError;
use crate::models::contracts::ContractsForm;
use crate::models::file::{CreateBlankFile, UploadFileMetadata};
use crate::placeholders::build_placeholder_rows;

/// Contract template workbench: pick a form, read the placeholders its
/// fields derive, and attach a template document (uploaded or blank) that
/// then opens in the editor.
#[component]
pub fn NewContractTemplatePage() -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let navigate = use_navigate();
    crate::app::use_session_gate();

    let nav_to = RwSignal::new(None::<String>);
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if let Some(path) = nav_to.get() {
                navigate(&path, Default::default());
            }
        });
    }

    let selected_form_id = RwSignal::new(None::<i64>);
    let selected_form = RwSignal::new(None::<ContractsForm>);
    let error = RwSignal::new(None::<String>);
    let blank_name = RwSignal::new(String::new());
    let template_file = RwSignal::new_local(None::<SelectedFile>);
    let copied = RwSignal::new(None::<String>);

    let forms = LocalResource::new({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            async move { ctx.list_contracts_forms().await }
        }
    });

    let form_detail = LocalResource::new({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            let form_id = selected_form_id.get();
            async move {
                match form_id {
                    Some(id) => ctx.get_contracts_form(id).await.map(Some),
                    None => Ok(None),
                }
            }
        }
    });

    Effect::new(move |_| {
        let Some(result) = form_detail.get() else {
            return;
        };
        match &result {
            Ok(Some(form)) => {
                if blank_name.read_untracked().is_empty() {
                    blank_name.set(format!("Plantilla - {}.docx", form.name));
                }
                selected_form.set(Some(form.clone()));
            }
            Ok(None) => selected_form.set(None),
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let placeholder_rows = Memo::new(move |_| {
        selected_form
            .read()
            .as_ref()
            .map(|form| build_placeholder_rows(&form.form))
            .unwrap_or_default()
    });

    // Attach an uploaded or blank template, associate it with the form, and
    // jump into the editor.
    let attach_action = Action::new_local({
        let ctx = ctx.clone();
        move |source: &TemplateSource| {
            let ctx = ctx.clone();
            let source = source.clone();
            let form_id = selected_form_id.get_untracked();
            async move {
                let Some(form_id) = form_id else {
                    return Err(AppError::Internal("selecciona un formulario primero".into()));
                };

                let file = match source {
                    TemplateSource::Upload(file) => {
                        let content = file.bytes().await?;
                        let metadata = UploadFileMetadata {
                            is_template: Some(true),
                            ..Default::default()
                        };
                        ctx.upload_file(&file.name, &file.mime, content, &metadata).await?
                    }
                    TemplateSource::Blank(file_name) => {
                        let mut payload = CreateBlankFile::named(file_name);
                        payload.is_template = Some(true);
                        ctx.create_blank_file(&payload).await?
                    }
                };

                let form = ctx.set_form_template(form_id, Some(&file.id)).await?;
                Ok((file.id, form))
            }
        }
    });
    let is_saving = attach_action.pending();

    Effect::new(move |_| {
        let Some(result) = attach_action.value().get() else {
            return;
        };
        match result {
            Ok((file_id, form)) => {
                let form_id = form.contracts_form_id;
                selected_form.set(Some(form));
                nav_to.set(Some(format!(
                    "/editor/{file_id}?mode=edit&contractsFormId={form_id}"
                )));
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let handle_template_file = move |ev: leptos::ev::Event| {
        if let Some(file) = SelectedFile::from_change_event(&ev) {
            template_file.set(Some(file));
        }
    };

    let handle_upload_template = move |_| {
        if let Some(file) = template_file.get_untracked() {
            error.set(None);
            attach_action.dispatch_local(TemplateSource::Upload(file));
        }
    };

    let handle_create_blank = move |_| {
        let name = blank_name.get_untracked();
        let name = name.trim().to_string();
        if !name.is_empty() {
            error.set(None);
            attach_action.dispatch_local(TemplateSource::Blank(name));
        }
    };

    let copy_token = Callback::new(move |token: String| {
        crate::browser::copy_to_clipboard(&token);
        copied.set(Some(token));
    });

    let on_generated = Callback::new(move |file_id: String| {
        nav_to.set(Some(format!("/editor/{file_id}?mode=edit")));
    });

    // Generation is driven off the selected form's contract record.
    let contract_id = Memo::new(move |_| {
        selected_form
            .read()
            .as_ref()
            .map(|form| form.contracts_form_id.to_string())
    });

    view! {
        <div class="contracts-page">
            <header class="contracts-header">
                <a class="btn btn-ghost" href="/dashboard" title="Volver">"←"</a>
                <h1>"Nueva Plantilla de Contrato"</h1>
            </header>

            <main class="contracts-main">
                {move || {
                    error.get().map(|message| view! {
                        <div class="alert alert-error"><p>{message}</p></div>
                    })
                }}

                <section class="contracts-form-picker">
                    <label>"Formulario de contrato"</label>
                    {move || {
                        match forms.get() {
                            None => view! { <p>"Cargando formularios..."</p> }.into_any(),
                            Some(result) => match &result {
                                Err(err) => view! {
                                    <div class="alert alert-error"><p>{err.to_string()}</p></div>
                                }
                                    .into_any(),
                                Ok(list) => {
                                    let list = list.clone();
                                    view! {
                                        <select on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            selected_form_id.set(value.parse().ok());
                                        }>
                                            <option value="">"Selecciona un formulario"</option>
                                            {list
                                                .into_iter()
                                                .map(|form| view! {
                                                    <option value=form.contracts_form_id.to_string()>
                                                        {form.name}
                                                    </option>
                                                })
                                                .collect_view()}
                                        </select>
                                    }
                                        .into_any()
                                }
                            },
                        }
                    }}
                </section>

                {move || {
                    selected_form.read().as_ref().map(|form| {
                        let form_name = form.name.clone();
                        view! {
                            <section class="contracts-placeholders">
                                <h2>{format!("Campos de {form_name}")}</h2>
                                <p class="hint">
                                    "Usa estos marcadores en la plantilla; se reemplazan al generar el documento"
                                </p>
                                <table class="placeholder-table">
                                    <thead>
                                        <tr>
                                            <th>"Campo"</th>
                                            <th>"Por título"</th>
                                            <th>"Por UUID"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {placeholder_rows
                                            .get()
                                            .into_iter()
                                            .map(|row| view! {
                                                <tr>
                                                    <td>{row.label.clone()}</td>
                                                    <td>
                                                        {row.by_title.map(|token| {
                                                            let shown = token.clone();
                                                            view! {
                                                                <button
                                                                    class="token"
                                                                    title="Copiar"
                                                                    on:click=move |_| copy_token.run(token.clone())
                                                                >
                                                                    <code>{shown.clone()}</code>
                                                                    {move || (copied.get().as_deref() == Some(shown.as_str()))
                                                                        .then(|| view! { <span class="copied">" ✓"</span> })}
                                                                </button>
                                                            }
                                                        })}
                                                    </td>
                                                    <td>
                                                        {row.by_id.map(|token| {
                                                            let shown = token.clone();
                                                            view! {
                                                                <button
                                                                    class="token"
                                                                    title="Copiar"
                                                                    on:click=move |_| copy_token.run(token.clone())
                                                                >
                                                                    <code>{shown.clone()}</code>
                                                                    {move || (copied.get().as_deref() == Some(shown.as_str()))
                                                                        .then(|| view! { <span class="copied">" ✓"</span> })}
                                                                </button>
                                                            }
                                                        })}
                                                    </td>
                                                </tr>
                                            })
                                            .collect_view()}
                                    </tbody>
                                </table>
                            </section>

                            <section class="contracts-template">
                                <h2>"Plantilla del contrato"</h2>

                                <div class="template-option">
                                    <h3>"Subir un documento existente"</h3>
                                    <input type="file" on:change=handle_template_file />
                                    <button
                                        class="btn btn-primary"
                                        on:click=handle_upload_template
                                        prop:disabled=move || is_saving.get() || template_file.read().is_none()
                                    >
                                        {move || if is_saving.get() { "Guardando..." } else { "Subir y asociar" }}
                                    </button>
                                </div>

                                <div class="template-option">
                                    <h3>"Crear un documento en blanco"</h3>
                                    <input
                                        type="text"
                                        prop:value=blank_name
                                        on:input=move |ev| blank_name.set(event_target_value(&ev))
                                    />
                                    <button
                                        class="btn btn-primary"
                                        on:click=handle_create_blank
                                        prop:disabled=is_saving
                                    >
                                        {move || if is_saving.get() { "Guardando..." } else { "Crear y asociar" }}
                                    </button>
                                </div>

                                <GenerateDocumentButton
                                    contract_id=contract_id
                                    on_generated=on_generated
                                />
                            </section>
                        }
                    })
                }}
            </main>
        </div>
    }
}

/// Where the template document comes from.
#[derive(Clone)]
enum TemplateSource {
    Upload(SelectedFile),
    Blank(String),
}
