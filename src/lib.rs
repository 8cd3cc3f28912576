#![recursion_limit = "256"]

pub mod app;
pub mod browser;
pub mod error;
pub mod placeholders;
pub mod session;
pub mod models {
    pub mod auth;
    pub mod collaboration;
    pub mod contracts;
    pub mod editor;
    pub mod file;
    pub mod version;
}
pub mod api {
    pub mod auth;
    pub mod collaboration;
    pub mod contracts;
    pub mod files;
    pub mod http;
}
pub mod editor {
    pub mod component;
    pub mod lifecycle;
    pub mod request;
    pub mod script;
    pub mod surface;
}
pub mod components {
    pub mod dashboard;
    pub mod duplicate_modal;
    pub mod file_list;
    pub mod generate_document;
    pub mod login;
    pub mod manual_session;
    pub mod placeholder_panel;
    pub mod tenant_config;
    pub mod upload_modal;
    pub mod versions_modal;
}
pub mod contracts {
    pub mod component;
}

/// Client-side entry point, called by the generated bundle once the WASM
/// module is instantiated.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
