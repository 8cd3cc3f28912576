mod common;

use legajo::error::AppError;
use legajo::models::auth::LoginCredentials;

#[tokio::test]
async fn sign_in_posts_credentials() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    ctx.sign_in(&LoginCredentials {
        email: "ana@empresa.com".into(),
        password: "secreta".into(),
    })
    .await
    .unwrap();

    let recorded = env.find_request("POST", "/auth/sign_in").unwrap();
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["email"].as_str(), Some("ana@empresa.com"));
}

#[tokio::test]
async fn sign_in_does_not_carry_tenant_header() {
    let env = common::TestEnv::start().await;
    let ctx = env.with_tenant("tenant-9");

    ctx.sign_in(&LoginCredentials {
        email: "ana@empresa.com".into(),
        password: "secreta".into(),
    })
    .await
    .unwrap();

    // The tenant header belongs to the files domain only.
    let recorded = env.find_request("POST", "/auth/sign_in").unwrap();
    assert_eq!(recorded.tenant_header, None);
}

#[tokio::test]
async fn failed_sign_in_is_a_login_error_not_an_expired_session() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    let err = ctx
        .sign_in(&LoginCredentials {
            email: "ana@empresa.com".into(),
            password: "mala".into(),
        })
        .await
        .unwrap_err();

    match err {
        AppError::Backend { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Error al iniciar sesión");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn logout_swallows_backend_failures() {
    let env = common::TestEnv::start().await;
    let ctx = env.ctx();

    // The mock's logout always fails with a 500; the call must not surface it.
    ctx.logout().await;

    assert!(env.find_request("POST", "/auth/logout").is_some());
}
