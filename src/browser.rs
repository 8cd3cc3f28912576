//! Thin wrappers over browser-only facilities. Every function is a no-op (or
//! returns nothing) outside the hydrated client so components compile on the
//! server render path unchanged.

use crate::error::AppError;

/// The path currently shown in the address bar.
pub fn current_path() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()?.location().pathname().ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Hard navigation, bypassing the client router. Used when identity state
/// changed and the whole app must re-bootstrap (tenant saved, 401, logout).
pub fn hard_redirect(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}

pub fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

/// Copy text to the clipboard, best-effort.
pub fn copy_to_clipboard(text: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else { return };
        let promise = window.navigator().clipboard().write_text(text);
        leptos::task::spawn_local(async move {
            if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
                tracing::warn!("no se pudo copiar al portapapeles");
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
    }
}

/// Materialize fetched bytes as a browser download.
pub fn save_file(file_name: &str, bytes: &[u8]) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let array = js_sys::Array::new();
        array.push(&js_sys::Uint8Array::from(bytes));
        let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence(&array) else {
            return;
        };
        let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
            return;
        };

        let anchor = document
            .create_element("a")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok());
        if let (Some(anchor), Some(body)) = (anchor, document.body()) {
            anchor.set_href(&url);
            anchor.set_download(file_name);
            let _ = body.append_child(&anchor);
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
        let _ = web_sys::Url::revoke_object_url(&url);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, bytes);
    }
}

/// A file picked in an `<input type="file">`, with its content still inside
/// the browser until [`SelectedFile::bytes`] is awaited.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    #[cfg(feature = "hydrate")]
    handle: web_sys::File,
}

impl SelectedFile {
    /// The file selected in the change event's input element, if any.
    pub fn from_change_event(ev: &leptos::ev::Event) -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let input: web_sys::HtmlInputElement =
                ev.target()?.dyn_into().ok()?;
            let file = input.files()?.get(0)?;
            Some(Self {
                name: file.name(),
                mime: file.type_(),
                size: file.size() as u64,
                handle: file,
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
            None
        }
    }

    /// Read the file's content.
    pub async fn bytes(&self) -> Result<Vec<u8>, AppError> {
        #[cfg(feature = "hydrate")]
        {
            let buffer = wasm_bindgen_futures::JsFuture::from(self.handle.array_buffer())
                .await
                .map_err(|_| AppError::Internal("no se pudo leer el archivo".into()))?;
            Ok(js_sys::Uint8Array::new(&buffer).to_vec())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AppError::Internal("no se pudo leer el archivo".into()))
        }
    }
}
