//! Loader for the external editor's bootstrap script. The script is fetched
//! once per page lifetime; later configuration changes reuse it.

use crate::error::AppError;

#[cfg(feature = "hydrate")]
mod imp {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use crate::error::AppError;

    thread_local! {
        static SCRIPT_LOADED: Cell<bool> = const { Cell::new(false) };
    }

    pub fn load_editor_script(url: &str, on_done: impl FnOnce(Result<(), AppError>) + 'static) {
        if SCRIPT_LOADED.with(|loaded| loaded.get()) {
            on_done(Ok(()));
            return;
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            on_done(Err(AppError::ScriptLoad("sin contexto de navegador".into())));
            return;
        };

        let script = match document
            .create_element("script")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlScriptElement>().ok())
        {
            Some(script) => script,
            None => {
                on_done(Err(AppError::ScriptLoad(
                    "no se pudo crear el elemento script".into(),
                )));
                return;
            }
        };

        script.set_src(url);
        script.set_async(true);

        // Whichever of onload/onerror fires first consumes the callback.
        let pending: Rc<RefCell<Option<Box<dyn FnOnce(Result<(), AppError>)>>>> =
            Rc::new(RefCell::new(Some(Box::new(on_done))));

        let on_load = {
            let pending = pending.clone();
            Closure::once(move || {
                SCRIPT_LOADED.with(|loaded| loaded.set(true));
                if let Some(done) = pending.borrow_mut().take() {
                    done(Ok(()));
                }
            })
        };
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let url_owned = url.to_string();
        let on_error = {
            let pending = pending.clone();
            Closure::once(move || {
                if let Some(done) = pending.borrow_mut().take() {
                    done(Err(AppError::ScriptLoad(url_owned)));
                }
            })
        };
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        // The handlers live for the page lifetime.
        on_load.forget();
        on_error.forget();

        let appended = document
            .head()
            .map(|head| head.append_child(&script).is_ok())
            .unwrap_or(false);
        if !appended {
            if let Some(done) = pending.borrow_mut().take() {
                done(Err(AppError::ScriptLoad(
                    "no se pudo insertar el script en la página".into(),
                )));
            }
        }
    }
}

#[cfg(feature = "hydrate")]
pub use imp::load_editor_script;

#[cfg(not(feature = "hydrate"))]
pub fn load_editor_script(url: &str, on_done: impl FnOnce(Result<(), AppError>) + 'static) {
    let _ = url;
    on_done(Err(AppError::ScriptLoad(
        "el editor solo está disponible en el navegador".into(),
    )));
}
