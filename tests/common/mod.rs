use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::Router;

use legajo::api::http::{ApiContext, TENANT_HEADER};
use legajo::session::{MemorySession, SessionStore};

/// One request the mock backend saw, as the assertions need it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub tenant_header: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    force_unauthorized: Arc<AtomicBool>,
}

/// A mock of the external REST backend, served over real HTTP on an
/// ephemeral port so the reqwest-based clients exercise their actual wire
/// path. Lives for as long as this struct does.
pub struct TestEnv {
    pub base_url: String,
    pub session: Arc<MemorySession>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    force_unauthorized: Arc<AtomicBool>,
}

impl TestEnv {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let force_unauthorized = Arc::new(AtomicBool::new(false));

        let state = MockState {
            requests: requests.clone(),
            force_unauthorized: force_unauthorized.clone(),
        };
        let router = Router::new().fallback(mock_handler).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .expect("mock backend stopped");
        });

        Self {
            base_url: format!("http://{addr}"),
            session: Arc::new(MemorySession::default()),
            requests,
            force_unauthorized,
        }
    }

    /// An API context pointed at the mock backend (both domains share it).
    pub fn ctx(&self) -> ApiContext {
        let session: Arc<dyn SessionStore> = self.session.clone();
        ApiContext::new(&self.base_url, &self.base_url, session)
    }

    pub fn with_tenant(&self, tenant_id: &str) -> ApiContext {
        self.session.set_tenant_id(tenant_id);
        self.ctx()
    }

    /// Make every following request answer 401.
    pub fn force_unauthorized(&self) {
        self.force_unauthorized.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests()
            .last()
            .cloned()
            .expect("no request reached the mock backend")
    }

    pub fn find_request(&self, method: &str, path: &str) -> Option<Recorded> {
        self.requests()
            .into_iter()
            .find(|r| r.method == method && r.path == path)
    }
}

async fn mock_handler(State(state): State<MockState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let tenant_header = header(&request, TENANT_HEADER);
    let content_type = header(&request, "content-type");

    let body = axum::body::to_bytes(request.into_body(), 64 * 1024 * 1024)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
        .unwrap_or_default();

    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        tenant_header,
        content_type,
        body: body.clone(),
    });

    if state.force_unauthorized.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "sesión no válida" })),
        )
            .into_response();
    }

    route_response(&method, &path, query.as_deref(), &body)
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn route_response(method: &Method, path: &str, query: Option<&str>, body: &str) -> Response {
    let body_json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();

    match (method.as_str(), path) {
        ("POST", "/auth/sign_in") => {
            if body_json["password"].as_str() == Some("mala") {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "message": "Credenciales inválidas" })),
                )
                    .into_response();
            }
            Json(serde_json::json!({})).into_response()
        }
        ("POST", "/auth/logout") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "logout caído" })),
        )
            .into_response(),

        ("GET", "/files") => Json(serde_json::json!({
            "files": [file_json("f1", "Informe.docx", 3), file_json("f2", "Contrato.docx", 1)]
        }))
        .into_response(),
        ("POST", "/files/upload") => Json(file_json("f9", "Subido.docx", 1)).into_response(),
        ("POST", "/files/create-blank") => {
            let name = body_json["fileName"].as_str().unwrap_or("Nuevo.docx");
            Json(file_json("f10", name, 1)).into_response()
        }
        ("GET", "/files/f1") => Json(file_json("f1", "Informe.docx", 3)).into_response(),
        ("GET", "/files/f1/download") => Body::from("contenido del documento").into_response(),
        ("DELETE", "/files/f1") => StatusCode::NO_CONTENT.into_response(),
        ("POST", "/files/f1/duplicate") => {
            let name = body_json["newName"]
                .as_str()
                .map(str::to_string)
                .or_else(|| {
                    body_json["suffix"]
                        .as_str()
                        .map(|s| format!("Informe_{s}.docx"))
                })
                .unwrap_or_else(|| "Informe.docx (copia)".to_string());
            Json(file_json("f11", &name, 1)).into_response()
        }
        ("GET", "/files/f1/signed-url") => Json(serde_json::json!({
            "url": "https://files.example/signed/f1"
        }))
        .into_response(),
        ("GET", "/files/f1/history") => Json(serde_json::json!({
            "fileId": "f1",
            "fileName": "Informe.docx",
            "currentVersion": 3,
            "versions": [
                version_json("v3", 3), version_json("v2", 2), version_json("v1", 1)
            ]
        }))
        .into_response(),

        ("GET", "/onlyoffice/open-file/f1") => {
            let mode = query
                .and_then(|q| q.split('&').find_map(|p| p.strip_prefix("mode=")))
                .unwrap_or("edit");
            Json(descriptor_json("plain", mode)).into_response()
        }
        ("GET", "/onlyoffice/open-file/f1/version/2") => {
            Json(descriptor_json("historical", "view")).into_response()
        }
        ("GET", "/onlyoffice/compare/f1/1/2") => {
            Json(descriptor_json("comparison", "view")).into_response()
        }

        ("POST", "/collaboration/start") => Json(serde_json::json!({
            "sessionId": "cs-1",
            "session": session_json("cs-1")
        }))
        .into_response(),
        ("GET", "/collaboration/sessions/f1") => Json(serde_json::json!({
            "sessions": [session_json("cs-1")]
        }))
        .into_response(),
        ("POST", "/collaboration/sessions/cs-1/activity") => {
            Json(serde_json::json!({})).into_response()
        }
        ("DELETE", "/collaboration/sessions/cs-1") => StatusCode::NO_CONTENT.into_response(),

        ("GET", "/contracts-forms") => Json(serde_json::json!({
            "items": [
                { "contractsFormId": 7, "name": "Arrendamiento", "fileId": null },
                { "contractsFormId": 8, "name": "Servicios" }
            ]
        }))
        .into_response(),
        ("GET", "/contracts-forms/7") => Json(form_json(serde_json::Value::Null)).into_response(),
        ("PATCH", "/contracts-forms/7") => {
            Json(form_json(body_json["fileId"].clone())).into_response()
        }
        ("POST", "/contracts/7/generate-doc") => {
            Json(file_json("f12", "Arrendamiento - Generado.docx", 1)).into_response()
        }

        _ => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "ruta no encontrada" })),
        )
            .into_response(),
    }
}

fn file_json(id: &str, name: &str, version: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "fileName": name,
        "originalName": name,
        "fileSize": 2048,
        "mimeType": "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "fileExtension": "docx",
        "version": version,
        "uploadedBy": "u-1",
        "uploadedByName": "Ana Pérez",
        "createdAt": "2025-04-01T09:00:00Z",
        "updatedAt": "2025-05-02T10:30:00Z"
    })
}

fn version_json(id: &str, version: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "version": version,
        "fileName": "Informe.docx",
        "fileSize": 1024 + version,
        "uploadedBy": "u-1",
        "uploadedByName": "Ana Pérez",
        "createdAt": format!("2025-04-0{version}T09:00:00Z"),
        "changes": (version > 1).then(|| format!("Revisión {version}"))
    })
}

fn descriptor_json(kind: &str, mode: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "config": {
            "document": {
                "fileType": "docx",
                "key": format!("doc-key-{kind}"),
                "title": "Informe.docx",
                "url": "https://files.example/f1"
            },
            "documentType": "word",
            "editorConfig": { "mode": mode },
            "token": "jwt-token"
        },
        "editorApiUrl": "https://onlyoffice.example/web-apps/apps/api/documents/api.js",
        "sessionId": "cs-1",
        "fileInfo": { "id": "f1", "fileName": "Informe.docx", "version": 3 },
        "isComparison": kind == "comparison",
        "isHistoricalVersion": kind == "historical"
    })
}

fn session_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "fileId": "f1",
        "userId": "u-1",
        "userName": "Ana Pérez",
        "startedAt": "2025-05-02T10:00:00Z",
        "lastActivity": "2025-05-02T10:05:00Z",
        "permissions": { "edit": true, "download": true, "comment": true, "fillForms": true, "review": true }
    })
}

fn form_json(file_id: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "contractsFormId": 7,
        "name": "Arrendamiento",
        "fileId": file_id,
        "form": [
            { "id": "a-1", "title": "Monto" },
            { "id": "a-2", "title": "" },
            { "id": "a-3", "title": "Nombre del Cliente (Principal)" }
        ]
    })
}
