use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::api::http::ApiContext;
use crate::components::placeholder_panel::PlaceholderPanel;
use crate::editor::lifecycle::{EditorLifecycle, RefreshAction};
use crate::editor::request::{EditorMode, EditorRequest};
use crate::editor::script::load_editor_script;
use crate::editor::surface::{default_surface, EditorCallbacks};
use crate::error::AppError;
use crate::models::editor::EditorDescriptor;
use crate::placeholders::build_placeholders;
use crate::session::login_redirect_url;

/// Id of the element the external editor mounts into.
pub const EDITOR_CONTAINER_ID: &str = "onlyoffice-editor";

/// The editor host page: fetches the session descriptor selected by the
/// route, loads the bootstrap script, and drives the lifecycle state machine
/// through the editor's callbacks.
#[component]
pub fn EditorPage() -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    crate::app::use_session_gate();
    let params = use_params_map();
    let query = use_query_map();

    let file_id = Memo::new(move |_| params.read().get("file_id").unwrap_or_default());
    let request = Memo::new(move |_| {
        let q = query.read();
        EditorRequest::from_query(
            q.get("mode").as_deref(),
            q.get("version").as_deref(),
            q.get("v1").as_deref(),
            q.get("v2").as_deref(),
        )
    });
    let contracts_form_id =
        Memo::new(move |_| query.read().get("contractsFormId").and_then(|v| v.parse::<i64>().ok()));

    let config = RwSignal::new(None::<EditorDescriptor>);
    let error = RwSignal::new(None::<String>);
    let app_ready = RwSignal::new(false);
    let doc_ready = RwSignal::new(false);
    let session_id = RwSignal::new(None::<String>);
    // Bumped by the editor's refresh-request event / by a forced reload.
    let refresh_tick = RwSignal::new(0u32);
    let reload_tick = RwSignal::new(0u32);

    let lifecycle = StoredValue::new_local(EditorLifecycle::new(default_surface()));

    // One descriptor fetch per (route params, forced reload) combination.
    let descriptor_res = LocalResource::new({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            let file_id = file_id.get();
            let request = request.get();
            reload_tick.track();
            lifecycle.update_value(|lc| lc.begin_load());
            async move { ctx.fetch_editor_descriptor(&file_id, &request).await }
        }
    });

    // Descriptor arrived (or failed).
    Effect::new(move |_| {
        let Some(result) = descriptor_res.get() else {
            return;
        };
        match &result {
            Ok(descriptor) => {
                if let Some(id) = &descriptor.session_id {
                    session_id.set(Some(id.clone()));
                }
                error.set(None);
                config.set(Some(descriptor.clone()));
            }
            Err(AppError::Unauthorized) => {
                let path = crate::browser::current_path().unwrap_or_else(|| "/dashboard".into());
                crate::browser::hard_redirect(&login_redirect_url(&path));
            }
            Err(err) => {
                let message = err.to_string();
                lifecycle.update_value(|lc| lc.fail(message.clone()));
                error.set(Some(message));
            }
        }
    });

    // Configuration present: load the script once, then initialize.
    Effect::new(move |_| {
        let Some(descriptor) = config.get() else {
            return;
        };

        if descriptor.editor_api_url.is_empty() {
            let message = "No se pudo obtener la URL del editor".to_string();
            lifecycle.update_value(|lc| lc.fail(message.clone()));
            error.set(Some(message));
            return;
        }

        let callbacks = EditorCallbacks {
            on_app_ready: Rc::new(move || app_ready.set(true)),
            on_document_ready: Rc::new(move || doc_ready.set(true)),
            on_error: Rc::new(move |message: String| {
                app_ready.set(false);
                doc_ready.set(false);
                error.set(Some(message));
            }),
            on_refresh_requested: Rc::new(move || refresh_tick.update(|n| *n += 1)),
        };

        lifecycle.update_value(|lc| lc.begin_script_load());
        let url = descriptor.editor_api_url.clone();
        load_editor_script(&url, move |loaded| {
            if let Err(err) = loaded {
                let message = err.to_string();
                lifecycle.update_value(|lc| lc.fail(message.clone()));
                error.set(Some(message));
                return;
            }

            let key = descriptor.document_key().unwrap_or_default().to_string();
            let outcome = lifecycle.try_update_value(|lc| {
                lc.initialize(&key, EDITOR_CONTAINER_ID, &descriptor.config, &callbacks)
            });
            if let Some(Err(err)) = outcome {
                error.set(Some(err.to_string()));
            }
        });
    });

    // The editor's own signals drive the machine from effects, never from
    // inside its construction.
    Effect::new(move |_| {
        if app_ready.get() {
            lifecycle.update_value(|lc| lc.confirm_app_ready());
        }
    });
    Effect::new(move |_| {
        if doc_ready.get() {
            lifecycle.update_value(|lc| lc.confirm_document_ready());
        }
    });
    Effect::new(move |_| {
        if let Some(message) = error.get() {
            lifecycle.update_value(|lc| lc.fail(message));
        }
    });

    // Refresh protocol: idempotent, bounded by the self-clear timeout.
    Effect::new(move |_| {
        if refresh_tick.get() == 0 {
            return;
        }
        let action = lifecycle
            .try_update_value(|lc| lc.request_refresh())
            .unwrap_or(RefreshAction::Ignored);
        match action {
            RefreshAction::Ignored => {}
            RefreshAction::Requested => arm_refresh_timer(lifecycle),
            RefreshAction::ReloadConfig => {
                reload_tick.update(|n| *n += 1);
                arm_refresh_timer(lifecycle);
            }
        }
    });

    // Dynamic placeholders when the editor was opened from a contract form.
    let form_fields = LocalResource::new({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            let form_id = contracts_form_id.get();
            async move {
                match form_id {
                    Some(id) => match ctx.get_contracts_form(id).await {
                        Ok(form) => build_placeholders(&form.form),
                        Err(err) => {
                            tracing::warn!("no se pudo cargar el formulario de contrato: {err}");
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                }
            }
        }
    });
    let dynamic_fields = Memo::new(move |_| {
        form_fields
            .get()
            .map(|fields| fields.clone())
            .unwrap_or_default()
    });

    let insertion_ready = Memo::new(move |_| app_ready.get() && doc_ready.get());
    let read_only = Memo::new(move |_| {
        let from_descriptor = config
            .read()
            .as_ref()
            .map(|c| c.is_read_only())
            .unwrap_or(false);
        from_descriptor || matches!(request.get(), EditorRequest::Open(EditorMode::View))
    });

    let on_insert = Callback::new(move |key: String| {
        let inserted = lifecycle
            .try_update_value(|lc| lc.insert_placeholder(&key))
            .unwrap_or(false);
        if !inserted {
            tracing::warn!("no se pudo insertar el campo {key}");
        }
    });

    // Navigating away destroys the instance and ends the collaboration
    // session, both best-effort.
    on_cleanup(move || {
        lifecycle.update_value(|lc| lc.teardown());
        if let Some(id) = session_id.get_untracked() {
            let ctx = ApiContext::from_build_env(crate::session::default_session_store());
            leptos::task::spawn_local(async move {
                ctx.end_collaboration(&id).await;
            });
        }
    });

    let is_loading = Memo::new(move |_| config.read().is_none() && error.read().is_none());

    view! {
        <div class="editor-page">
            {move || {
                error.get().map(|message| view! {
                    <div class="fullscreen-message">
                        <div class="fullscreen-card">
                            <h2>"Error"</h2>
                            <p class="error">{message}</p>
                            <a class="btn btn-primary" href="/dashboard">"Volver al Dashboard"</a>
                        </div>
                    </div>
                })
            }}
            {move || {
                (is_loading.get()).then(|| view! {
                    <div class="fullscreen-message">
                        <div class="fullscreen-card">
                            <span class="loading loading-spinner loading-lg"></span>
                            <p>"Cargando editor..."</p>
                        </div>
                    </div>
                })
            }}

            <header class="editor-header">
                <a class="btn btn-ghost" href="/dashboard" title="Volver">"←"</a>
                <div>
                    <h1>{move || {
                        config.read().as_ref().map(|c| c.file_name().to_string()).unwrap_or_else(|| "Editor".into())
                    }}</h1>
                    {move || {
                        config.read().as_ref().and_then(|c| {
                            if c.is_historical_version() {
                                Some(view! { <p class="subtitle">"Versión histórica (solo lectura)"</p> })
                            } else if c.is_comparison() {
                                Some(view! { <p class="subtitle">"Comparación de versiones"</p> })
                            } else {
                                None
                            }
                        })
                    }}
                </div>
            </header>

            <main class="editor-layout">
                <PlaceholderPanel
                    ready=insertion_ready
                    read_only=read_only
                    dynamic_fields=dynamic_fields
                    on_insert=on_insert
                />
                <div class="editor-frame">
                    <div id=EDITOR_CONTAINER_ID></div>
                </div>
            </main>
        </div>
    }
}

/// Clear a stuck refresh flag if no document-ready signal follows.
#[cfg(feature = "hydrate")]
fn arm_refresh_timer(lifecycle: StoredValue<EditorLifecycle, LocalStorage>) {
    use crate::editor::lifecycle::REFRESH_TIMEOUT_MS;

    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(REFRESH_TIMEOUT_MS).await;
        lifecycle.try_update_value(|lc| lc.refresh_timeout_elapsed());
    });
}

#[cfg(not(feature = "hydrate"))]
fn arm_refresh_timer(_lifecycle: StoredValue<EditorLifecycle, LocalStorage>) {}
