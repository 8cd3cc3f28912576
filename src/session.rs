use std::sync::Arc;

/// Where the session redirects land.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// Routes reachable without a session cookie.
pub const PUBLIC_PATHS: &[&str] = &["/login"];

const TENANT_KEY: &str = "tenantId";
const MANUAL_SESSION_KEY: &str = "manual_sessionId";
const SESSION_COOKIE: &str = "sessionId";

/// Client-side identity state: the tenant id attached to every files-domain
/// request and the developer escape hatch for pasting a session cookie.
///
/// Modelled as an explicitly passed store rather than ambient globals so the
/// API context owns its configuration; the browser implementation is a thin
/// view over localStorage and `document.cookie`.
pub trait SessionStore: Send + Sync {
    fn tenant_id(&self) -> Option<String>;
    fn set_tenant_id(&self, tenant_id: &str);
    /// The `sessionId` cookie value the backend set at login, if present.
    fn session_cookie(&self) -> Option<String>;
    fn manual_session(&self) -> Option<String>;
    /// Store a hand-pasted session value and mirror it into the cookie.
    fn set_manual_session(&self, value: &str);
    fn clear_manual_session(&self);
}

/// In-memory store used on the server render path and in tests.
#[derive(Default)]
pub struct MemorySession {
    inner: std::sync::Mutex<MemorySessionState>,
}

#[derive(Default)]
struct MemorySessionState {
    tenant_id: Option<String>,
    session: Option<String>,
}

impl SessionStore for MemorySession {
    fn tenant_id(&self) -> Option<String> {
        self.inner.lock().unwrap().tenant_id.clone()
    }

    fn set_tenant_id(&self, tenant_id: &str) {
        self.inner.lock().unwrap().tenant_id = Some(tenant_id.to_string());
    }

    fn session_cookie(&self) -> Option<String> {
        self.inner.lock().unwrap().session.clone()
    }

    fn manual_session(&self) -> Option<String> {
        self.inner.lock().unwrap().session.clone()
    }

    fn set_manual_session(&self, value: &str) {
        self.inner.lock().unwrap().session = Some(value.to_string());
    }

    fn clear_manual_session(&self) {
        self.inner.lock().unwrap().session = None;
    }
}

/// Browser-backed store. Stateless: every call reads the live document.
#[cfg(feature = "hydrate")]
pub struct BrowserSession;

#[cfg(feature = "hydrate")]
impl BrowserSession {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn cookie_string() -> Option<String> {
        use wasm_bindgen::JsCast;
        let document = web_sys::window()?.document()?;
        let html_doc: web_sys::HtmlDocument = document.dyn_into().ok()?;
        html_doc.cookie().ok()
    }

    fn write_cookie(value: &str) {
        use wasm_bindgen::JsCast;
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(html_doc) = document.dyn_into::<web_sys::HtmlDocument>() {
            let _ = html_doc.set_cookie(value);
        }
    }
}

#[cfg(feature = "hydrate")]
impl SessionStore for BrowserSession {
    fn tenant_id(&self) -> Option<String> {
        Self::local_storage()?.get_item(TENANT_KEY).ok()?
    }

    fn set_tenant_id(&self, tenant_id: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.set_item(TENANT_KEY, tenant_id);
        }
    }

    fn session_cookie(&self) -> Option<String> {
        parse_cookie(&Self::cookie_string()?, SESSION_COOKIE)
    }

    fn manual_session(&self) -> Option<String> {
        Self::local_storage()?.get_item(MANUAL_SESSION_KEY).ok()?
    }

    fn set_manual_session(&self, value: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.set_item(MANUAL_SESSION_KEY, value);
        }
        Self::write_cookie(&format!(
            "{SESSION_COOKIE}={value}; path=/; max-age=86400; SameSite=Lax"
        ));
    }

    fn clear_manual_session(&self) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(MANUAL_SESSION_KEY);
        }
        Self::write_cookie(&format!("{SESSION_COOKIE}=; path=/; max-age=0; SameSite=Lax"));
    }
}

/// The store appropriate for the current build target.
pub fn default_session_store() -> Arc<dyn SessionStore> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserSession)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemorySession::default())
    }
}

/// Extract one cookie value from a `document.cookie` string.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}

/// What the router should do with a navigation, given session presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    /// Send the user to login, preserving where they wanted to go.
    RedirectLogin { redirect: String },
    RedirectDashboard,
}

/// Session gating, mirroring the reverse-proxy rules the product deploys
/// with: private paths need a session; a logged-in user never sees the login
/// page or the bare root.
pub fn route_decision(path: &str, has_session: bool) -> RouteDecision {
    let is_public = PUBLIC_PATHS.iter().any(|p| path.starts_with(p));

    if !has_session && !is_public {
        return RouteDecision::RedirectLogin {
            redirect: path.to_string(),
        };
    }

    if has_session && is_public {
        if path == DEFAULT_REDIRECT {
            return RouteDecision::Proceed;
        }
        return RouteDecision::RedirectDashboard;
    }

    if has_session && path == "/" {
        return RouteDecision::RedirectDashboard;
    }

    RouteDecision::Proceed
}

/// The login route with the original destination preserved.
pub fn login_redirect_url(path: &str) -> String {
    format!("/login?redirect={}", urlencoding::encode(path))
}
