use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::api::http::ApiContext;
use crate::components::duplicate_modal::DuplicateFileModal;
use crate::components::file_list::FileList;
use crate::components::tenant_config::TenantConfig;
use crate::components::upload_modal::UploadFileModal;
use crate::components::versions_modal::FileVersionsModal;
use crate::error::AppError;
use crate::models::file::{DuplicateOptions, FileMetadata, ListFilesFilter};

/// The dashboard: file list plus every file-level action (upload, edit,
/// versions, download, duplicate, delete) and logout.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let navigate = use_navigate();
    crate::app::use_session_gate();

    // Callbacks request navigation through a signal; the effect below owns
    // the router handle.
    let nav_to = RwSignal::new(None::<String>);
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if let Some(path) = nav_to.get() {
                navigate(&path, Default::default());
            }
        });
    }

    let files = RwSignal::new(Vec::<FileMetadata>::new());
    let error = RwSignal::new(None::<String>);
    let upload_open = RwSignal::new(false);
    let versions_open = RwSignal::new(false);
    let duplicate_open = RwSignal::new(false);
    let duplicate_error = RwSignal::new(None::<String>);
    let selected_file_id = RwSignal::new(String::new());
    let selected_file_name = RwSignal::new(String::new());

    let load_action = Action::new_local({
        let ctx = ctx.clone();
        move |_: &()| {
            let ctx = ctx.clone();
            async move { ctx.list_files(&ListFilesFilter::default()).await }
        }
    });
    let is_loading = load_action.pending();

    Effect::new(move |_| {
        let Some(result) = load_action.value().get() else {
            return;
        };
        match result {
            Ok(response) => {
                error.set(None);
                files.set(response.files);
            }
            Err(AppError::Unauthorized) => redirect_to_login(),
            Err(AppError::Backend { status: 404, .. }) => {
                error.set(Some(
                    "El endpoint de archivos no existe. Verifica la URL de la API.".into(),
                ));
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    // Initial load.
    Effect::new(move |_| {
        load_action.dispatch_local(());
    });

    let handle_logout = {
        let ctx = ctx.clone();
        move |_| {
            let ctx = ctx.clone();
            leptos::task::spawn_local(async move {
                ctx.logout().await;
                nav_to.set(Some("/login".to_string()));
            });
        }
    };

    let on_edit = Callback::new(move |file_id: String| {
        nav_to.set(Some(format!("/editor/{file_id}?mode=edit")));
    });

    let on_versions = Callback::new(move |(file_id, file_name): (String, String)| {
        selected_file_id.set(file_id);
        selected_file_name.set(file_name);
        versions_open.set(true);
    });

    let download_action = Action::new_local({
        let ctx = ctx.clone();
        move |(file_id, file_name): &(String, String)| {
            let ctx = ctx.clone();
            let file_id = file_id.clone();
            let file_name = file_name.clone();
            async move {
                let bytes = ctx.download_file(&file_id).await?;
                crate::browser::save_file(&file_name, &bytes);
                Ok(())
            }
        }
    });
    Effect::new(move |_| {
        if let Some(Err(err)) = download_action.value().get() {
            match err {
                AppError::Unauthorized => redirect_to_login(),
                err => error.set(Some(err.to_string())),
            }
        }
    });
    let on_download = Callback::new(move |target: (String, String)| {
        download_action.dispatch_local(target);
    });

    let on_duplicate = Callback::new(move |(file_id, file_name): (String, String)| {
        selected_file_id.set(file_id);
        selected_file_name.set(file_name);
        duplicate_error.set(None);
        duplicate_open.set(true);
    });

    let delete_action = Action::new_local({
        let ctx = ctx.clone();
        move |file_id: &String| {
            let ctx = ctx.clone();
            let file_id = file_id.clone();
            async move { ctx.delete_file(&file_id).await }
        }
    });
    Effect::new(move |_| {
        let Some(result) = delete_action.value().get() else {
            return;
        };
        match result {
            Ok(()) => {
                load_action.dispatch_local(());
            }
            Err(AppError::Unauthorized) => redirect_to_login(),
            Err(err) => error.set(Some(err.to_string())),
        }
    });
    let on_delete = Callback::new(move |file_id: String| {
        delete_action.dispatch_local(file_id);
    });

    let duplicate_action = Action::new_local({
        let ctx = ctx.clone();
        move |(file_id, options): &(String, DuplicateOptions)| {
            let ctx = ctx.clone();
            let file_id = file_id.clone();
            let options = options.clone();
            async move { ctx.duplicate_file(&file_id, &options).await }
        }
    });
    let duplicating = duplicate_action.pending();

    Effect::new(move |_| {
        let Some(result) = duplicate_action.value().get() else {
            return;
        };
        match result {
            Ok(_) => {
                duplicate_open.set(false);
                duplicate_error.set(None);
                load_action.dispatch_local(());
            }
            Err(err) => duplicate_error.set(Some(err.to_string())),
        }
    });

    let on_duplicate_confirm = Callback::new(move |(file_id, options): (String, DuplicateOptions)| {
        duplicate_error.set(None);
        duplicate_action.dispatch_local((file_id, options));
    });

    let on_view_version = Callback::new(move |version: u32| {
        let file_id = selected_file_id.get_untracked();
        nav_to.set(Some(format!("/editor/{file_id}?mode=view&version={version}")));
    });

    let on_compare = Callback::new(move |(v1, v2): (u32, u32)| {
        let file_id = selected_file_id.get_untracked();
        nav_to.set(Some(format!("/editor/{file_id}?mode=compare&v1={v1}&v2={v2}")));
    });

    view! {
        <div class="dashboard">
            <TenantConfig />

            <header class="dashboard-header">
                <div>
                    <h1>"Dashboard"</h1>
                    <p class="subtitle">"Gestiona tus archivos"</p>
                </div>
                <div class="dashboard-actions">
                    <button
                        class="btn btn-ghost"
                        title="Actualizar"
                        prop:disabled=is_loading
                        on:click=move |_| {
                            load_action.dispatch_local(());
                        }
                    >
                        "Actualizar"
                    </button>
                    <button class="btn btn-danger" on:click=handle_logout>
                        "Cerrar Sesión"
                    </button>
                </div>
            </header>

            <main class="dashboard-main">
                <div class="dashboard-toolbar">
                    <h2>"Mis Archivos"</h2>
                    <div class="dashboard-toolbar-actions">
                        <a class="btn" href="/contracts/templates/new">"Plantillas de Contrato"</a>
                        <button class="btn btn-primary" on:click=move |_| upload_open.set(true)>
                            "Subir Archivo"
                        </button>
                    </div>
                </div>

                {move || {
                    error.get().map(|message| view! {
                        <div class="alert alert-error"><p>{message}</p></div>
                    })
                }}

                {move || {
                    if is_loading.get() && files.read().is_empty() {
                        view! {
                            <div class="dashboard-loading">
                                <span class="loading loading-spinner loading-lg"></span>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <FileList
                                files=files
                                on_edit=on_edit
                                on_versions=on_versions
                                on_download=on_download
                                on_duplicate=on_duplicate
                                on_delete=on_delete
                            />
                        }
                            .into_any()
                    }
                }}
            </main>

            <UploadFileModal
                is_open=upload_open
                on_close=Callback::new(move |()| upload_open.set(false))
                on_success=Callback::new(move |()| {
                    load_action.dispatch_local(());
                })
            />

            <FileVersionsModal
                is_open=versions_open
                file_id=selected_file_id
                file_name=selected_file_name
                on_close=Callback::new(move |()| versions_open.set(false))
                on_view_version=on_view_version
                on_compare=on_compare
            />

            <DuplicateFileModal
                is_open=duplicate_open
                file_id=selected_file_id
                file_name=selected_file_name
                on_close=Callback::new(move |()| duplicate_open.set(false))
                on_duplicate=on_duplicate_confirm
                is_loading=duplicating
                error=duplicate_error
            />
        </div>
    }
}

/// Hard redirect to login preserving the current location.
fn redirect_to_login() {
    let path = crate::browser::current_path().unwrap_or_else(|| "/dashboard".into());
    crate::browser::hard_redirect(&crate::session::login_redirect_url(&path));
}
