mod common;

use legajo::editor::request::{EditorMode, EditorRequest};
use legajo::error::AppError;
use legajo::models::file::{CreateBlankFile, DuplicateOptions, ListFilesFilter, UploadFileMetadata};

#[tokio::test]
async fn list_files_carries_tenant_header() {
    let env = common::TestEnv::start().await;
    let ctx = env.with_tenant("tenant-9");

    let response = ctx.list_files(&ListFilesFilter::default()).await.unwrap();

    assert_eq!(response.files.len(), 2);
    assert_eq!(response.files[0].file_name, "Informe.docx");
    let recorded = env.find_request("GET", "/files").unwrap();
    assert_eq!(recorded.tenant_header.as_deref(), Some("tenant-9"));
}

#[tokio::test]
async fn list_files_without_tenant_sends_no_header() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    ctx.list_files(&ListFilesFilter::default()).await.unwrap();

    let recorded = env.find_request("GET", "/files").unwrap();
    assert_eq!(recorded.tenant_header, None);
}

#[tokio::test]
async fn list_files_passes_server_side_filters() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let filter = ListFilesFilter {
        is_contract: Some("true".into()),
        contract_id: None,
        is_public: Some("false".into()),
    };
    ctx.list_files(&filter).await.unwrap();

    let recorded = env.find_request("GET", "/files").unwrap();
    let query = recorded.query.unwrap();
    assert!(query.contains("isContract=true"));
    assert!(query.contains("isPublic=false"));
    assert!(!query.contains("contractId"));
}

#[tokio::test]
async fn unauthorized_maps_to_dedicated_error() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();
    env.force_unauthorized();

    let err = ctx.list_files(&ListFilesFilter::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}

#[tokio::test]
async fn backend_error_message_is_surfaced_verbatim() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let err = ctx.get_file_metadata("desconocido").await.unwrap_err();
    match err {
        AppError::Backend { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "ruta no encontrada");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn upload_sends_multipart_with_flags() {
    let env = common::TestEnv::start().await;
    let ctx = env.with_tenant("tenant-9");

    let metadata = UploadFileMetadata {
        is_template: Some(true),
        is_contract: None,
        contract_id: Some("c-1".into()),
        is_public: None,
    };
    let uploaded = ctx
        .upload_file(
            "Plantilla.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            b"PK\x03\x04contenido".to_vec(),
            &metadata,
        )
        .await
        .unwrap();

    assert_eq!(uploaded.id, "f9");
    let recorded = env.find_request("POST", "/files/upload").unwrap();
    assert!(recorded
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    assert_eq!(recorded.tenant_header.as_deref(), Some("tenant-9"));
    assert!(recorded.body.contains("name=\"file\""));
    assert!(recorded.body.contains("filename=\"Plantilla.docx\""));
    assert!(recorded.body.contains("name=\"isTemplate\""));
    assert!(recorded.body.contains("name=\"contractId\""));
    assert!(!recorded.body.contains("name=\"isPublic\""));
}

#[tokio::test]
async fn create_blank_posts_the_chosen_name() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let mut payload = CreateBlankFile::named("Plantilla - Arrendamiento.docx");
    payload.is_template = Some(true);
    let file = ctx.create_blank_file(&payload).await.unwrap();

    assert_eq!(file.file_name, "Plantilla - Arrendamiento.docx");
    let recorded = env.find_request("POST", "/files/create-blank").unwrap();
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["fileName"].as_str(), Some("Plantilla - Arrendamiento.docx"));
    assert_eq!(body["isTemplate"].as_bool(), Some(true));
    assert!(body.get("contractId").is_none());
}

#[tokio::test]
async fn download_returns_raw_bytes() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let bytes = ctx.download_file("f1").await.unwrap();
    assert_eq!(bytes, b"contenido del documento");
}

#[tokio::test]
async fn delete_hits_the_file_route() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    ctx.delete_file("f1").await.unwrap();
    assert!(env.find_request("DELETE", "/files/f1").is_some());
}

#[tokio::test]
async fn duplicate_sends_the_selected_options() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let options = DuplicateOptions {
        suffix: Some("v2".into()),
        new_name: None,
    };
    let copy = ctx.duplicate_file("f1", &options).await.unwrap();

    assert_eq!(copy.file_name, "Informe_v2.docx");
    let recorded = env.find_request("POST", "/files/f1/duplicate").unwrap();
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["suffix"].as_str(), Some("v2"));
    assert!(body.get("newName").is_none());
}

#[tokio::test]
async fn duplicate_without_options_lets_the_server_name_the_copy() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let copy = ctx
        .duplicate_file("f1", &DuplicateOptions::default())
        .await
        .unwrap();

    assert_eq!(copy.file_name, "Informe.docx (copia)");
    let recorded = env.find_request("POST", "/files/f1/duplicate").unwrap();
    assert_eq!(recorded.body, "{}");
}

#[tokio::test]
async fn signed_url_is_unwrapped() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let url = ctx.get_signed_url("f1").await.unwrap();
    assert_eq!(url, "https://files.example/signed/f1");
}

#[tokio::test]
async fn history_lists_versions_most_recent_first() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let versions = ctx.get_file_history("f1").await.unwrap();
    assert_eq!(versions.len(), 3);
    assert_eq!(versions[0].version, 3);
    assert_eq!(versions[2].version, 1);
    assert_eq!(versions[0].changes.as_deref(), Some("Revisión 3"));
}

#[tokio::test]
async fn plain_open_requests_the_mode_query() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let descriptor = ctx
        .fetch_editor_descriptor("f1", &EditorRequest::Open(EditorMode::View))
        .await
        .unwrap();

    assert_eq!(descriptor.document_key(), Some("doc-key-plain"));
    let recorded = env.find_request("GET", "/onlyoffice/open-file/f1").unwrap();
    assert_eq!(recorded.query.as_deref(), Some("mode=view"));
}

#[tokio::test]
async fn version_request_uses_the_version_route() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let descriptor = ctx
        .fetch_editor_descriptor("f1", &EditorRequest::Version(2))
        .await
        .unwrap();

    assert!(descriptor.is_historical_version());
    assert!(descriptor.is_read_only());
    assert!(env
        .find_request("GET", "/onlyoffice/open-file/f1/version/2")
        .is_some());
}

#[tokio::test]
async fn comparison_route_wins_when_both_versions_are_present() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    // Route parameters with v1, v2 AND version set: the comparison request
    // must be the only one issued.
    let request = EditorRequest::from_query(Some("edit"), Some("3"), Some("1"), Some("2"));
    let descriptor = ctx.fetch_editor_descriptor("f1", &request).await.unwrap();

    assert!(descriptor.is_comparison());
    assert!(env.find_request("GET", "/onlyoffice/compare/f1/1/2").is_some());
    assert!(env.find_request("GET", "/onlyoffice/open-file/f1").is_none());
    assert!(env
        .find_request("GET", "/onlyoffice/open-file/f1/version/3")
        .is_none());
    assert_eq!(env.requests().len(), 1);
}
