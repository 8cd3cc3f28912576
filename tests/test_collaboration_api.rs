mod common;

use legajo::models::collaboration::StartCollaborationRequest;

#[tokio::test]
async fn start_collaboration_returns_the_session() {
    let env = common::TestEnv::start().await;
    let ctx = env.with_tenant("tenant-9");

    let response = ctx
        .start_collaboration(&StartCollaborationRequest::for_file("f1"))
        .await
        .unwrap();

    assert_eq!(response.session_id, "cs-1");
    assert_eq!(response.session.file_id, "f1");
    assert!(response.session.permissions.edit);

    let recorded = env.find_request("POST", "/collaboration/start").unwrap();
    assert_eq!(recorded.tenant_header.as_deref(), Some("tenant-9"));
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["fileId"].as_str(), Some("f1"));
    assert!(body.get("userId").is_none());
}

#[tokio::test]
async fn active_sessions_are_unwrapped() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let sessions = ctx.get_active_sessions("f1").await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, "cs-1");
}

#[tokio::test]
async fn ending_a_session_is_best_effort() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    // Known session: plain teardown.
    ctx.end_collaboration("cs-1").await;
    assert!(env
        .find_request("DELETE", "/collaboration/sessions/cs-1")
        .is_some());

    // Unknown session: the 404 is swallowed.
    ctx.end_collaboration("cs-desconocida").await;
    assert!(env
        .find_request("DELETE", "/collaboration/sessions/cs-desconocida")
        .is_some());
}

#[tokio::test]
async fn activity_heartbeat_never_fails() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    ctx.update_session_activity("cs-1").await;
    ctx.update_session_activity("cs-caida").await;

    assert!(env
        .find_request("POST", "/collaboration/sessions/cs-1/activity")
        .is_some());
}
