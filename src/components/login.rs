use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api::http::ApiContext;
use crate::components::manual_session::ManualSession;
use crate::models::auth::LoginCredentials;
use crate::session::DEFAULT_REDIRECT;

/// Login page. On success the backend sets the session cookie and the user
/// lands wherever they originally wanted to go.
#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    // Already logged in? Straight to the dashboard.
    {
        let session = StoredValue::new_local(ctx.session().clone());
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if session.with_value(|s| s.session_cookie().is_some()) {
                navigate(DEFAULT_REDIRECT, Default::default());
            }
        });
    }

    let redirect_target = Memo::new(move |_| {
        query
            .read()
            .get("redirect")
            .filter(|r| r.starts_with('/'))
            .unwrap_or_else(|| DEFAULT_REDIRECT.to_string())
    });

    let login_action = Action::new_local({
        let ctx = ctx.clone();
        move |credentials: &LoginCredentials| {
            let ctx = ctx.clone();
            let credentials = credentials.clone();
            async move { ctx.sign_in(&credentials).await }
        }
    });
    let is_loading = login_action.pending();

    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            let Some(result) = login_action.value().get() else {
                return;
            };
            match result {
                Ok(()) => navigate(&redirect_target.get_untracked(), Default::default()),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    }

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        login_action.dispatch_local(LoginCredentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Iniciar Sesión"</h1>
                <p class="subtitle">"Accede a la gestión de documentos"</p>

                <form on:submit=handle_submit>
                    {move || {
                        error.get().map(|message| view! {
                            <div class="alert alert-error"><p>{message}</p></div>
                        })
                    }}

                    <label>"Email"</label>
                    <input
                        type="email"
                        placeholder="usuario@empresa.com"
                        prop:value=email
                        on:input=move |ev| email.set(event_target_value(&ev))
                        required
                    />

                    <label>"Contraseña"</label>
                    <input
                        type="password"
                        placeholder="••••••••"
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                        required
                    />

                    <button type="submit" class="btn btn-primary" prop:disabled=is_loading>
                        {move || if is_loading.get() { "Iniciando sesión..." } else { "Iniciar Sesión" }}
                    </button>
                </form>
            </div>
            <ManualSession />
        </div>
    }
}
