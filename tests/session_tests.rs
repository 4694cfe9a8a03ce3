use std::fs;

use lims_client::auth::{Credentials, Lab, Role};
use lims_client::config::ClientOptions;
use lims_client::error::Error;
use lims_client::navigation::{Navigator, Page, View};
use lims_client::Lims;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({
            "username": "admin1",
            "password": "secret",
            "lab": "central"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "token": "tok-admin",
            "username": "admin1",
            "role": "CENTRAL_ADMIN",
            "lab": "central"
        })))
        .mount(server)
        .await;
}

fn options(server: &MockServer, dir: &std::path::Path) -> ClientOptions {
    ClientOptions::default()
        .with_base_url(&server.uri())
        .with_session_dir(dir)
}

#[tokio::test]
async fn session_survives_restart_until_logout() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let dir = tempdir().unwrap();

    let mut lims = Lims::new_with_options(options(&server, dir.path())).unwrap();
    let user = lims
        .login(&Credentials::new("admin1", "secret", Lab::Central))
        .await
        .unwrap();
    assert_eq!(user.role, Role::CentralAdmin);
    assert!(dir.path().join("lims_auth.json").exists());

    let mut restarted = Lims::new_with_options(options(&server, dir.path())).unwrap();
    let restored = restarted.session_mut().restore().unwrap();
    assert_eq!(restored.as_ref(), Some(&user));

    let navigator = Navigator::for_session(restored.as_ref());
    assert_eq!(navigator.current(), Page::Dashboard);
    assert_eq!(navigator.view(restored.as_ref()), View::Dashboard);

    restarted.logout().unwrap();
    assert!(restarted.session().current().is_none());

    let mut after_logout = Lims::new_with_options(options(&server, dir.path())).unwrap();
    let restored = after_logout.session_mut().restore().unwrap();
    assert_eq!(restored, None);
    assert_eq!(Navigator::for_session(None).view(None), View::Login);
}

#[tokio::test]
async fn rejected_login_is_reported_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false,
            "error": "Invalid credentials"
        })))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    let mut lims = Lims::new_with_options(options(&server, dir.path())).unwrap();
    let err = lims
        .login(&Credentials::new("admin1", "wrong", Lab::Central))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 401, .. }));
    assert_eq!(err.user_message(&server.uri()), "Invalid credentials");
    assert!(lims.session().current().is_none());
    assert!(!dir.path().join("lims_auth.json").exists());
}

#[tokio::test]
async fn blank_password_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut lims = Lims::new(&server.uri()).unwrap();
    let err = lims
        .login(&Credentials::new("admin1", "", Lab::Central))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn corrupt_session_entry_is_discarded() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("lims_auth.json");
    fs::write(&file, "{not json").unwrap();

    let options = ClientOptions::default().with_session_dir(dir.path());
    let mut lims = Lims::new_with_options(options).unwrap();

    assert_eq!(lims.session_mut().restore().unwrap(), None);
    assert!(!file.exists());
}

#[test]
fn custom_session_key_names_the_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("plant_one.json"),
        json!({
            "username": "op1",
            "role": "PLANT_EMPLOYEE",
            "lab": "plant-1",
            "token": "tok-1"
        })
        .to_string(),
    )
    .unwrap();

    let options = ClientOptions::default()
        .with_session_dir(dir.path())
        .with_session_key("plant_one");
    let mut lims = Lims::new_with_options(options).unwrap();

    let user = lims.session_mut().restore().unwrap().unwrap();
    assert_eq!(user.lab, Lab::Plant(1));
    assert_eq!(lims.session().token(), Some("tok-1"));
}
