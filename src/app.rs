use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::hooks::use_navigate;
use leptos_router::path;

use crate::api::http::ApiContext;
use crate::session::{default_session_store, route_decision, RouteDecision, DEFAULT_REDIRECT};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = ApiContext::from_build_env(default_session_store());
    provide_context(ctx);

    view! {
        <Stylesheet id="leptos" href="/pkg/legajo.css"/>
        <Title text="Legajo - Gestión de Documentos"/>

        <Router>
            <main>
                <Routes fallback=|| view! { "Página no encontrada." }.into_view()>
                    <Route path=path!("/") view=RootRedirect/>
                    <Route path=path!("/login") view=crate::components::login::LoginPage/>
                    <Route path=path!("/dashboard") view=crate::components::dashboard::DashboardPage/>
                    <Route path=path!("/editor/:file_id") view=crate::editor::component::EditorPage/>
                    <Route path=path!("/contracts/templates/new") view=crate::contracts::component::NewContractTemplatePage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Apply the session gate to the page calling this: no session on a private
/// path sends the user to login (keeping the destination), while a session on
/// a public path lands on the dashboard.
pub fn use_session_gate() {
    let ctx = expect_context::<ApiContext>();
    let session = StoredValue::new_local(ctx.session().clone());
    let navigate = use_navigate();

    Effect::new(move |_| {
        let has_session = session.with_value(|s| s.session_cookie().is_some());
        let path = crate::browser::current_path().unwrap_or_else(|| "/".to_string());
        match route_decision(&path, has_session) {
            RouteDecision::Proceed => {}
            RouteDecision::RedirectLogin { redirect } => {
                navigate(&crate::session::login_redirect_url(&redirect), Default::default());
            }
            RouteDecision::RedirectDashboard => {
                navigate(DEFAULT_REDIRECT, Default::default());
            }
        }
    });
}

/// The bare root only dispatches: dashboard with a session, login without.
#[component]
fn RootRedirect() -> impl IntoView {
    use_session_gate();

    view! {
        <div class="fullscreen-message">
            <span class="loading loading-spinner loading-lg"></span>
        </div>
    }
}
