//! Live stream handshake against mock sign-in, federation and AVS endpoints

mod common;

use btsport_core::{AuthState, AuthStep, BtSportError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/siteminderagent/forms/login.fcc";
const FEDERATION_PATH: &str = "/sportgetfedwebhls";
const AVS_PATH: &str = "/AVS/besc";

const FEDERATION_PAGE: &str = r#"
<html>
<body onload="document.forms[0].submit()">
    <form method="POST" action="https://be.avs.bt.com/AVS/besc?action=LoginBT&amp;channel=WEBHLS">
        <input type="hidden" name="SAMLResponse" value="PHNhbWw+YXNzZXJ0aW9uPC9zYW1sPg=="/>
    </form>
</body>
</html>
"#;

async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_string_contains("USER=fan%40example.com"))
        .and(body_string_contains("PASSWORD=hunter2"))
        .and(body_string_contains("TARGET=https%3A%2F%2Fhome.bt.com%2Fsecure%2F"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SMSESSION=sm-token; Path=/; HttpOnly")
                .set_body_string("<html>Welcome</html>"),
        )
        .mount(server)
        .await;
}

async fn mount_sport_login_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FEDERATION_PATH))
        .and(header("cookie", "SMSESSION=sm-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEDERATION_PAGE))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(AVS_PATH))
        .and(query_param("action", "LoginBT"))
        .and(query_param("channel", "WEBHLS"))
        .and(body_string_contains(
            "SAMLResponse=PHNhbWw%2BYXNzZXJ0aW9uPC9zYW1sPg%3D%3D",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "avs_cookie=avs-123; Path=/AVS")
                .set_body_json(json!({"resultCode": "OK"})),
        )
        .mount(server)
        .await;
}

async fn mount_cdn_ok(server: &MockServer, channel_id: u32) {
    Mock::given(method("GET"))
        .and(path(AVS_PATH))
        .and(query_param("action", "GetCDN"))
        .and(query_param("type", "LIVE"))
        .and(query_param("id", channel_id.to_string()))
        .and(query_param("channel", "WEBHLS"))
        .and(query_param("asJson", "Y"))
        .and(header("cookie", "avs_cookie=avs-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "OK",
            "resultObj": {"src": format!("https://live.example/{}/master.m3u8?token=t", channel_id)}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_returns_session() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;

    let scraper = common::scraper_for(&server);
    let session = scraper.login("fan@example.com", "hunter2").await.unwrap();
    assert_eq!(session.as_deref(), Some("sm-token"));
}

#[tokio::test]
async fn test_login_wrong_credentials_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Sorry, try again</html>"))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let session = scraper.login("fan@example.com", "wrong").await.unwrap();
    assert_eq!(session, None);
}

#[tokio::test]
async fn test_login_collects_cookie_from_redirect_hop() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("set-cookie", "SMSESSION=from-redirect; Path=/")
                .insert_header("location", "/secure/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/secure/"))
        .and(header("cookie", "SMSESSION=from-redirect"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>My BT</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let session = scraper.login("fan@example.com", "hunter2").await.unwrap();
    assert_eq!(session.as_deref(), Some("from-redirect"));
}

#[tokio::test]
async fn test_sport_login_returns_avs_cookie() {
    let server = MockServer::start().await;
    mount_sport_login_ok(&server).await;

    let scraper = common::scraper_for(&server);
    let avs_cookie = scraper.sport_login("sm-token").await.unwrap();
    assert_eq!(avs_cookie, "avs-123");
}

#[tokio::test]
async fn test_sport_login_without_saml_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEDERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><form></form></html>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(AVS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    match scraper.sport_login("sm-token").await {
        Err(BtSportError::ElementNotFound(name)) => assert_eq!(name, "SAMLResponse"),
        other => panic!("Expected ElementNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sport_login_without_avs_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEDERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEDERATION_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(AVS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let result = scraper.sport_login("sm-token").await;
    assert!(matches!(result, Err(BtSportError::CookieNotFound(_))));
}

#[tokio::test]
async fn test_hls_url_resolves_stream() {
    let server = MockServer::start().await;
    mount_cdn_ok(&server, 2020).await;

    let scraper = common::scraper_for(&server);
    let url = scraper.hls_url(Some("avs-123"), 2020).await.unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://live.example/2020/master.m3u8?token=t")
    );
}

#[tokio::test]
async fn test_hls_url_without_cookie_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    assert_eq!(scraper.hls_url(None, 2020).await.unwrap(), None);
}

#[tokio::test]
async fn test_hls_url_stream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AVS_PATH))
        .and(query_param("action", "GetCDN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "KO",
            "resultObj": null,
            "errorDescription": "ACN_3041",
            "message": "Concurrent stream limit reached"
        })))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    match scraper.hls_url(Some("avs-123"), 2021).await {
        Err(BtSportError::StreamUnavailable {
            description,
            message,
        }) => {
            assert_eq!(description, "ACN_3041");
            assert_eq!(message, "Concurrent stream limit reached");
        }
        other => panic!("Expected StreamUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_advance_walks_every_state() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    mount_sport_login_ok(&server).await;
    mount_cdn_ok(&server, 2030).await;

    let scraper = common::scraper_for(&server);
    let state = scraper
        .advance(
            AuthState::Unauthenticated,
            AuthStep::Login {
                user: "fan@example.com",
                password: "hunter2",
            },
        )
        .await
        .unwrap();
    assert_eq!(state.name(), "session_established");

    let state = scraper.advance(state, AuthStep::SportLogin).await.unwrap();
    assert_eq!(state.avs_cookie(), Some("avs-123"));

    let state = scraper
        .advance(state, AuthStep::ResolveStream { channel_id: 2030 })
        .await
        .unwrap();
    assert_eq!(
        state.stream_url(),
        Some("https://live.example/2030/master.m3u8?token=t")
    );

    // expired AVS cookie: only the SSO step runs again
    let state = scraper
        .advance(state.reauthenticate_avs(), AuthStep::SportLogin)
        .await
        .unwrap();
    assert_eq!(state.session(), Some("sm-token"));
    assert_eq!(state.avs_cookie(), Some("avs-123"));
}

#[tokio::test]
async fn test_resolve_live_stream() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    mount_sport_login_ok(&server).await;
    mount_cdn_ok(&server, 2020).await;

    let scraper = common::scraper_for(&server);
    let url = scraper
        .resolve_live_stream("fan@example.com", "hunter2", 2020)
        .await
        .unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://live.example/2020/master.m3u8?token=t")
    );
}

#[tokio::test]
async fn test_resolve_live_stream_bad_credentials_stops_early() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Sorry</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FEDERATION_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let url = scraper
        .resolve_live_stream("fan@example.com", "wrong", 2020)
        .await
        .unwrap();
    assert_eq!(url, None);
}
