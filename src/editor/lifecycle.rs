use crate::editor::surface::{EditorCallbacks, EditorSurface};
use crate::error::AppError;
use crate::placeholders;

/// How long a refresh may stay in progress without a document-ready signal
/// before its flag self-clears.
pub const REFRESH_TIMEOUT_MS: u32 = 2_000;

/// Where the page is in the editor session's life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    /// Fetching the configuration descriptor.
    Loading,
    /// Fetching the editor's bootstrap script.
    ScriptLoading,
    /// Instance constructed, waiting for the app-ready signal.
    Initializing,
    AppReady,
    /// The document content itself has loaded; insertion is permitted.
    DocumentReady,
    /// Terminal for this page instance; the user navigates back manually.
    Failed(String),
}

/// Result of an initialization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Constructed,
    /// Redundant request for a configuration already live or in flight.
    Dropped,
}

/// What the page must do after asking for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshAction {
    /// A refresh is already in progress.
    Ignored,
    /// The instance is refreshing itself; arm the self-clear timeout.
    Requested,
    /// No in-place capability: reload the descriptor and reinitialize.
    ReloadConfig,
}

/// State machine for one page's editor session.
///
/// Owns the foreign editor surface exclusively: construction, destruction and
/// reinitialization all flow through here, which is what enforces the
/// one-instance-per-page invariant and the single-flight rule.
pub struct EditorLifecycle {
    surface: Box<dyn EditorSurface>,
    phase: EditorPhase,
    /// Configuration key of the constructed instance.
    active_key: Option<String>,
    /// Key whose construction has not yet seen app-ready.
    init_in_flight: Option<String>,
    refreshing: bool,
}

impl EditorLifecycle {
    pub fn new(surface: Box<dyn EditorSurface>) -> Self {
        Self {
            surface,
            phase: EditorPhase::Idle,
            active_key: None,
            init_in_flight: None,
            refreshing: false,
        }
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn begin_load(&mut self) {
        self.phase = EditorPhase::Loading;
    }

    pub fn begin_script_load(&mut self) {
        self.phase = EditorPhase::ScriptLoading;
    }

    /// Construct the editor for `key`, single-flight per configuration key.
    ///
    /// A request for the key already live (or still initializing) is dropped;
    /// a request for a different key destroys the previous instance first.
    pub fn initialize(
        &mut self,
        key: &str,
        container_id: &str,
        config: &serde_json::Value,
        callbacks: &EditorCallbacks,
    ) -> Result<InitOutcome, AppError> {
        if self.init_in_flight.as_deref() == Some(key) {
            return Ok(InitOutcome::Dropped);
        }

        if self.surface.is_constructed() {
            if self.active_key.as_deref() == Some(key) {
                return Ok(InitOutcome::Dropped);
            }
            self.destroy_surface();
        }

        self.phase = EditorPhase::Initializing;
        self.init_in_flight = Some(key.to_string());

        match self.surface.construct(container_id, config, callbacks) {
            Ok(()) => {
                self.active_key = Some(key.to_string());
                Ok(InitOutcome::Constructed)
            }
            Err(err) => {
                self.init_in_flight = None;
                self.phase = EditorPhase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// The editor signalled readiness to accept commands.
    pub fn confirm_app_ready(&mut self) {
        self.init_in_flight = None;
        self.phase = EditorPhase::AppReady;
    }

    /// The document content loaded. Also closes any refresh in progress.
    pub fn confirm_document_ready(&mut self) {
        self.phase = EditorPhase::DocumentReady;
        self.refreshing = false;
    }

    /// Script-load failures, construction exceptions and editor error events
    /// all end here; there is no automatic retry.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.init_in_flight = None;
        self.refreshing = false;
        self.phase = EditorPhase::Failed(message.into());
    }

    /// Handle the editor's request to refresh content. Idempotent against
    /// concurrent requests: only the first one acts until the flag clears.
    pub fn request_refresh(&mut self) -> RefreshAction {
        if self.refreshing {
            return RefreshAction::Ignored;
        }
        self.refreshing = true;

        if self.surface.refresh() {
            RefreshAction::Requested
        } else {
            RefreshAction::ReloadConfig
        }
    }

    /// The bounded timeout fired without a document-ready signal.
    pub fn refresh_timeout_elapsed(&mut self) {
        self.refreshing = false;
    }

    /// Placeholder insertion, permitted only once the document is ready.
    pub fn insert_placeholder(&mut self, key: &str) -> bool {
        if self.phase != EditorPhase::DocumentReady {
            return false;
        }
        self.surface.insert_text(&placeholders::token(key))
    }

    /// Best-effort teardown on navigation; destruction errors are logged,
    /// never surfaced.
    pub fn teardown(&mut self) {
        if self.surface.is_constructed() {
            self.destroy_surface();
        }
        self.init_in_flight = None;
        self.refreshing = false;
        self.phase = EditorPhase::Idle;
    }

    fn destroy_surface(&mut self) {
        if let Err(err) = self.surface.destroy() {
            tracing::warn!("error al destruir el editor: {err}");
        }
        self.active_key = None;
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::editor::surface::MockEditorSurface;

    fn callbacks() -> EditorCallbacks {
        EditorCallbacks {
            on_app_ready: Rc::new(|| {}),
            on_document_ready: Rc::new(|| {}),
            on_error: Rc::new(|_| {}),
            on_refresh_requested: Rc::new(|| {}),
        }
    }

    fn config() -> serde_json::Value {
        serde_json::json!({ "document": { "key": "k1" } })
    }

    #[test]
    fn back_to_back_initializations_construct_once() {
        let mut surface = MockEditorSurface::new();
        surface.expect_is_constructed().return_const(false);
        surface
            .expect_construct()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        let cb = callbacks();

        let first = lifecycle.initialize("k1", "onlyoffice-editor", &config(), &cb);
        let second = lifecycle.initialize("k1", "onlyoffice-editor", &config(), &cb);

        assert_eq!(first.unwrap(), InitOutcome::Constructed);
        assert_eq!(second.unwrap(), InitOutcome::Dropped);
    }

    #[test]
    fn same_key_is_dropped_even_after_app_ready() {
        let mut surface = MockEditorSurface::new();
        surface
            .expect_is_constructed()
            .returning({
                let mut constructed = false;
                move || {
                    let was = constructed;
                    constructed = true;
                    was
                }
            });
        surface
            .expect_construct()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        let cb = callbacks();

        lifecycle
            .initialize("k1", "onlyoffice-editor", &config(), &cb)
            .unwrap();
        lifecycle.confirm_app_ready();

        let again = lifecycle.initialize("k1", "onlyoffice-editor", &config(), &cb);
        assert_eq!(again.unwrap(), InitOutcome::Dropped);
    }

    #[test]
    fn different_key_destroys_previous_instance_first() {
        let mut surface = MockEditorSurface::new();
        let mut seq = mockall::Sequence::new();
        surface.expect_is_constructed().returning({
            let mut constructed = false;
            move || {
                let was = constructed;
                constructed = true;
                was
            }
        });
        surface
            .expect_construct()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        surface
            .expect_destroy()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        surface
            .expect_construct()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        let cb = callbacks();

        lifecycle
            .initialize("k1", "onlyoffice-editor", &config(), &cb)
            .unwrap();
        lifecycle.confirm_app_ready();

        let outcome = lifecycle
            .initialize("k2", "onlyoffice-editor", &config(), &cb)
            .unwrap();
        assert_eq!(outcome, InitOutcome::Constructed);
    }

    #[test]
    fn construction_error_is_terminal() {
        let mut surface = MockEditorSurface::new();
        surface.expect_is_constructed().return_const(false);
        surface
            .expect_construct()
            .returning(|_, _, _| Err(AppError::Editor("sin DocsAPI".into())));

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        let result = lifecycle.initialize("k1", "onlyoffice-editor", &config(), &callbacks());

        assert!(result.is_err());
        assert!(matches!(lifecycle.phase(), EditorPhase::Failed(_)));
    }

    #[test]
    fn concurrent_refresh_requests_are_ignored() {
        let mut surface = MockEditorSurface::new();
        surface.expect_refresh().times(1).return_const(true);

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));

        assert_eq!(lifecycle.request_refresh(), RefreshAction::Requested);
        assert_eq!(lifecycle.request_refresh(), RefreshAction::Ignored);
        assert!(lifecycle.is_refreshing());
    }

    #[test]
    fn refresh_without_capability_reloads_config() {
        let mut surface = MockEditorSurface::new();
        surface.expect_refresh().return_const(false);

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        assert_eq!(lifecycle.request_refresh(), RefreshAction::ReloadConfig);
    }

    #[test]
    fn refresh_flag_clears_on_timeout() {
        let mut surface = MockEditorSurface::new();
        surface.expect_refresh().times(2).return_const(true);

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        lifecycle.request_refresh();
        assert!(lifecycle.is_refreshing());

        lifecycle.refresh_timeout_elapsed();
        assert!(!lifecycle.is_refreshing());

        // A new request is accepted again after the self-clear.
        assert_eq!(lifecycle.request_refresh(), RefreshAction::Requested);
    }

    #[test]
    fn refresh_flag_clears_on_document_ready() {
        let mut surface = MockEditorSurface::new();
        surface.expect_refresh().return_const(true);

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        lifecycle.request_refresh();
        lifecycle.confirm_document_ready();
        assert!(!lifecycle.is_refreshing());
    }

    #[test]
    fn insertion_only_when_document_ready() {
        let mut surface = MockEditorSurface::new();
        surface.expect_is_constructed().return_const(false);
        surface.expect_construct().returning(|_, _, _| Ok(()));
        surface
            .expect_insert_text()
            .times(1)
            .withf(|text| text == "{{form_monto}}")
            .return_const(true);

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        let cb = callbacks();
        lifecycle
            .initialize("k1", "onlyoffice-editor", &config(), &cb)
            .unwrap();

        assert!(!lifecycle.insert_placeholder("form_monto"));

        lifecycle.confirm_app_ready();
        assert!(!lifecycle.insert_placeholder("form_monto"));

        lifecycle.confirm_document_ready();
        assert!(lifecycle.insert_placeholder("form_monto"));
    }

    #[test]
    fn teardown_swallows_destroy_errors() {
        let mut surface = MockEditorSurface::new();
        surface.expect_is_constructed().return_const(true);
        surface
            .expect_destroy()
            .returning(|| Err(AppError::Editor("ya destruido".into())));

        let mut lifecycle = EditorLifecycle::new(Box::new(surface));
        lifecycle.teardown();
        assert_eq!(*lifecycle.phase(), EditorPhase::Idle);
    }
}
