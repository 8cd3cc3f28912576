use std::rc::Rc;

use crate::error::AppError;

/// Hooks the lifecycle receives from the foreign editor instance. They only
/// write reactive state; the page drives the state machine from effects, so
/// a callback firing mid-construction cannot re-enter the machine.
#[derive(Clone)]
pub struct EditorCallbacks {
    pub on_app_ready: Rc<dyn Fn()>,
    pub on_document_ready: Rc<dyn Fn()>,
    pub on_error: Rc<dyn Fn(String)>,
    /// The editor asks for a content refresh after an out-of-band change.
    pub on_refresh_requested: Rc<dyn Fn()>,
}

/// The foreign editor boundary. The real implementation reaches objects a
/// third-party script injected into the page; everything behind this trait is
/// therefore best-effort and dynamically probed.
#[cfg_attr(test, mockall::automock)]
pub trait EditorSurface {
    /// Construct an editor instance inside the given container element.
    fn construct(
        &mut self,
        container_id: &str,
        config: &serde_json::Value,
        callbacks: &EditorCallbacks,
    ) -> Result<(), AppError>;

    /// Tear down the live instance, if any.
    fn destroy(&mut self) -> Result<(), AppError>;

    /// Ask the instance to refresh its content in place. `false` when the
    /// capability is absent and the caller must reload the configuration.
    fn refresh(&mut self) -> bool;

    /// Insert text at the cursor. `false` when no insertion method was found.
    fn insert_text(&mut self, text: &str) -> bool;

    fn is_constructed(&self) -> bool;
}

/// Surface used where no document editor exists (server rendering, native
/// tests that don't inject a mock).
pub struct NullSurface;

impl EditorSurface for NullSurface {
    fn construct(
        &mut self,
        _container_id: &str,
        _config: &serde_json::Value,
        _callbacks: &EditorCallbacks,
    ) -> Result<(), AppError> {
        Err(AppError::Editor(
            "el editor no está disponible en este entorno".into(),
        ))
    }

    fn destroy(&mut self) -> Result<(), AppError> {
        Ok(())
    }

    fn refresh(&mut self) -> bool {
        false
    }

    fn insert_text(&mut self, _text: &str) -> bool {
        false
    }

    fn is_constructed(&self) -> bool {
        false
    }
}

/// The surface appropriate for the current build target.
pub fn default_surface() -> Box<dyn EditorSurface> {
    #[cfg(feature = "hydrate")]
    {
        Box::new(docs_api::DocsApiSurface::new())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Box::new(NullSurface)
    }
}

#[cfg(feature = "hydrate")]
pub mod docs_api {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    use super::{EditorCallbacks, EditorSurface};
    use crate::error::AppError;

    /// Editor surface over the script-injected `window.DocsAPI.DocEditor`
    /// global. The instance and its event closures live exactly as long as
    /// the constructed editor.
    pub struct DocsApiSurface {
        instance: Option<js_sys::Object>,
        hooks: Vec<Closure<dyn FnMut(JsValue)>>,
    }

    impl DocsApiSurface {
        pub fn new() -> Self {
            Self {
                instance: None,
                hooks: Vec::new(),
            }
        }

        fn constructor() -> Result<js_sys::Function, AppError> {
            let window = web_sys::window()
                .ok_or_else(|| AppError::Editor("sin contexto de navegador".into()))?;
            let docs_api = js_sys::Reflect::get(&window, &JsValue::from_str("DocsAPI"))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .ok_or_else(|| {
                    AppError::Editor("el script del editor no expone DocsAPI".into())
                })?;
            js_sys::Reflect::get(&docs_api, &JsValue::from_str("DocEditor"))
                .ok()
                .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
                .ok_or_else(|| AppError::Editor("DocsAPI.DocEditor no disponible".into()))
        }

        fn hook(
            &mut self,
            events: &js_sys::Object,
            name: &str,
            handler: impl FnMut(JsValue) + 'static,
        ) {
            let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
            let _ = js_sys::Reflect::set(events, &JsValue::from_str(name), closure.as_ref());
            self.hooks.push(closure);
        }

        fn instance_method(&self, name: &str) -> Option<(js_sys::Object, js_sys::Function)> {
            let instance = self.instance.clone()?;
            let method = js_sys::Reflect::get(&instance, &JsValue::from_str(name))
                .ok()?
                .dyn_into::<js_sys::Function>()
                .ok()?;
            Some((instance, method))
        }
    }

    impl EditorSurface for DocsApiSurface {
        fn construct(
            &mut self,
            container_id: &str,
            config: &serde_json::Value,
            callbacks: &EditorCallbacks,
        ) -> Result<(), AppError> {
            use serde::Serialize;

            let constructor = Self::constructor()?;

            // Plain JS objects, not Maps, or the editor rejects the config.
            let serializer = serde_wasm_bindgen::Serializer::json_compatible();
            let js_config = config
                .serialize(&serializer)
                .map_err(|e| AppError::Editor(format!("configuración no serializable: {e}")))?;

            let events = js_sys::Object::new();
            let on_app_ready = callbacks.on_app_ready.clone();
            self.hook(&events, "onAppReady", move |_| on_app_ready());
            let on_document_ready = callbacks.on_document_ready.clone();
            self.hook(&events, "onDocumentReady", move |_| on_document_ready());
            let on_refresh = callbacks.on_refresh_requested.clone();
            self.hook(&events, "onRequestRefreshFile", move |_| on_refresh());
            let on_error = callbacks.on_error.clone();
            self.hook(&events, "onError", move |event| {
                on_error(describe_event(&event));
            });
            let _ = js_sys::Reflect::set(&js_config, &JsValue::from_str("events"), &events);

            let args = js_sys::Array::of2(&JsValue::from_str(container_id), &js_config);
            let instance = js_sys::Reflect::construct(&constructor, &args)
                .map_err(|e| AppError::Editor(describe_js_value(&e)))?;

            self.instance = Some(instance.unchecked_into());
            Ok(())
        }

        fn destroy(&mut self) -> Result<(), AppError> {
            let result = match self.instance_method("destroyEditor") {
                Some((instance, method)) => method
                    .call0(&instance)
                    .map(|_| ())
                    .map_err(|e| AppError::Editor(describe_js_value(&e))),
                None => Ok(()),
            };
            self.instance = None;
            self.hooks.clear();
            result
        }

        fn refresh(&mut self) -> bool {
            for name in ["refreshFile", "refresh"] {
                if let Some((instance, method)) = self.instance_method(name) {
                    if method.call0(&instance).is_ok() {
                        return true;
                    }
                }
            }
            false
        }

        fn insert_text(&mut self, text: &str) -> bool {
            // The editor builds expose text insertion under different names;
            // probe them in order, as the product has always done.
            if let Some((instance, method)) = self.instance_method("executeCommand") {
                let args = js_sys::Array::of1(&JsValue::from_str(text));
                if method
                    .call2(&instance, &JsValue::from_str("InsertText"), &args)
                    .is_ok()
                {
                    return true;
                }
            }
            if let Some((instance, method)) = self.instance_method("insertText") {
                if method.call1(&instance, &JsValue::from_str(text)).is_ok() {
                    return true;
                }
            }
            false
        }

        fn is_constructed(&self) -> bool {
            self.instance.is_some()
        }
    }

    /// Human-readable text for an editor event's `data` payload.
    fn describe_event(event: &JsValue) -> String {
        js_sys::Reflect::get(event, &JsValue::from_str("data"))
            .map(|data| describe_js_value(&data))
            .unwrap_or_else(|_| describe_js_value(event))
    }

    fn describe_js_value(value: &JsValue) -> String {
        if let Some(text) = value.as_string() {
            return text;
        }
        js_sys::JSON::stringify(value)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| "error desconocido del editor".to_string())
    }
}
