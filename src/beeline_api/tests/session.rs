use beeline_api::{
    account::DataPlan,
    client::{
        config::ClientConfig, cookies::CookieJar, error::ClientError, session,
        session::SessionOptions, BeelineWebClient,
    },
    constants::{INDEX_PATH, LOGIN_PATH, ROOT_PATH},
    types::{Login, Password},
};
use reqwest::Method;
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const INDEX_PAGE: &str = r#"<html><body><form id="j_idt1245" method="post" action="/c/pre/index.xhtml"><input type="hidden" name="javax.faces.ViewState" id="j_id1:javax.faces.ViewState:0" value="123:456" autocomplete="off" /></form></body></html>"#;
const STATELESS_PAGE: &str = r#"<html><body><form id="loginFormB2C:loginForm"><input type="hidden" name="javax.faces.ViewState" id="j_id1:javax.faces.ViewState:0" value="stateless" autocomplete="off" /></form></body></html>"#;
const BALANCE_FRAGMENT: &str = r#"<partial-response><changes><update id="j_idt1245:homeBalance"><![CDATA[<div id="j_idt1467:j_idt1469"><span class="price pos">1 234,56 <span class="rur">₽</span></span></div>]]></update></changes></partial-response>"#;
const DATA_PLAN_FRAGMENT: &str = r#"<partial-response><changes><update id="bonusesForm"><![CDATA[<div class="val">12,5 / 30,0</div>]]></update></changes></partial-response>"#;

fn login() -> Login {
    Login::new("9031234567").unwrap()
}

fn password() -> Password {
    Password::new("secret").unwrap()
}

fn client_for(server: &MockServer, options: SessionOptions) -> BeelineWebClient {
    BeelineWebClient::new(ClientConfig::new(&server.uri()).unwrap(), options).unwrap()
}

async fn mount_login(server: &MockServer, page: &str) {
    Mock::given(method("GET"))
        .and(path(ROOT_PATH))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Set-Cookie", "JSESSIONID=fresh; Path=/"),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("Cookie", "JSESSIONID=fresh"))
        .and(body_string_contains("loginFormB2C%3AloginForm%3Alogin=9031234567"))
        .and(body_string_contains("loginFormB2C%3AloginForm%3Apassword=secret"))
        .and(body_string_contains("javax.faces.ViewState=stateless"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn cached_session_skips_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .and(header("Cookie", "JSESSIONID=cached"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ROOT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut jar = CookieJar::new();
    jar.insert("JSESSIONID", "cached");

    let mut client = client_for(&server, SessionOptions::default());
    client
        .authenticate_with(&login(), &password(), Some(jar))
        .await
        .unwrap();

    assert!(client.is_authenticated());
    assert_eq!(client.view_state(), Some("123:456"));
}

#[tokio::test]
async fn expired_cached_session_falls_back_to_login() {
    let server = MockServer::start().await;
    // the cached page is not followed to the login form
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}{}", server.uri(), LOGIN_PATH)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_login(&server, INDEX_PAGE).await;

    let mut jar = CookieJar::new();
    jar.insert("JSESSIONID", "expired");
    jar.insert("stale", "1");

    let mut client = client_for(&server, SessionOptions::default());
    client
        .authenticate_with(&login(), &password(), Some(jar))
        .await
        .unwrap();

    assert_eq!(client.view_state(), Some("123:456"));
    assert_eq!(client.cookies().get("JSESSIONID"), Some("fresh"));
    assert_eq!(client.cookies().get("stale"), None);
}

#[tokio::test]
async fn login_response_without_view_state_fails() {
    let server = MockServer::start().await;
    mount_login(&server, "<html><body>Service unavailable</body></html>").await;

    let mut client = client_for(&server, SessionOptions::default());
    let err = client
        .authenticate_with(&login(), &password(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Authentication(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn stateless_view_state_fails() {
    let server = MockServer::start().await;
    mount_login(&server, STATELESS_PAGE).await;

    let mut client = client_for(&server, SessionOptions::default());
    let err = client
        .authenticate_with(&login(), &password(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Authentication(_)));
    assert_eq!(client.view_state(), None);
}

#[tokio::test]
async fn login_redirect_is_followed_with_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROOT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Set-Cookie", "JSESSIONID=authenticated; Path=/; HttpOnly")
                .insert_header("Location", format!("{}{}", server.uri(), INDEX_PATH)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .and(header("Cookie", "JSESSIONID=authenticated"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    client
        .authenticate_with(&login(), &password(), None)
        .await
        .unwrap();

    assert_eq!(client.view_state(), Some("123:456"));
}

#[tokio::test]
async fn request_follows_redirects_and_merges_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Set-Cookie", "a=1")
                .insert_header("Location", format!("{}/b", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .and(header("Cookie", "a=1"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Set-Cookie", "a=")
                .insert_header("Location", format!("{}/c", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .and(header("Cookie", "a=1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "c=3")
                .set_body_string("done"),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    let body = client.request(Method::GET, "/a", &[], 5).await.unwrap();

    assert_eq!(body, "done");
    assert_eq!(client.cookies().to_header().unwrap(), "a=1; c=3");
}

#[tokio::test]
async fn request_stops_when_redirect_budget_is_spent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/loop", server.uri())),
        )
        // first request plus 5 redirects
        .expect(6)
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    let err = client
        .request(Method::GET, "/loop", &[], 5)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus(302)));
}

#[tokio::test]
async fn request_rejects_foreign_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/away"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "https://example.com/elsewhere"),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    let err = client
        .request(Method::GET, "/away", &[], 5)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRedirect(_)));
}

#[tokio::test]
async fn request_fails_on_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    let err = client
        .request(Method::POST, LOGIN_PATH, &[("a", "b")], 5)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus(500)));
}

#[tokio::test]
async fn fetch_requires_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());

    assert!(matches!(
        client.get_balance().await,
        Err(ClientError::Authentication(_))
    ));
    assert!(matches!(
        client.get_data_plan().await,
        Err(ClientError::Authentication(_))
    ));
}

#[tokio::test]
async fn snapshot_reads_balance_and_data_plan() {
    let server = MockServer::start().await;
    mount_login(&server, INDEX_PAGE).await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .and(body_string_contains(
            "javax.faces.partial.render=j_idt1245%3AhomeBalance",
        ))
        .and(body_string_contains("javax.faces.ViewState=123%3A456"))
        .and(body_string_contains("javax.faces.partial.ajax=true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BALANCE_FRAGMENT))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .and(body_string_contains("javax.faces.partial.render=bonusesForm"))
        .and(body_string_contains("javax.faces.ViewState=123%3A456"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DATA_PLAN_FRAGMENT))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    client
        .authenticate_with(&login(), &password(), None)
        .await
        .unwrap();
    let snapshot = client.snapshot().await.unwrap();

    assert_eq!(snapshot.balance, 1234.56);
    assert_eq!(
        snapshot.data_plan,
        Some(DataPlan {
            used: 12.5,
            total: 30.0
        })
    );
}

#[tokio::test]
async fn snapshot_keeps_balance_when_data_plan_is_unreadable() {
    let server = MockServer::start().await;
    mount_login(&server, INDEX_PAGE).await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .and(body_string_contains("homeBalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BALANCE_FRAGMENT))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .and(body_string_contains("bonusesForm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<partial-response/>"))
        .mount(&server)
        .await;

    let mut client = client_for(&server, SessionOptions::default());
    client
        .authenticate_with(&login(), &password(), None)
        .await
        .unwrap();

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.balance, 1234.56);
    assert_eq!(snapshot.data_plan, None);

    assert!(matches!(
        client.get_data_plan().await,
        Err(ClientError::Parse(_))
    ));
}

#[tokio::test]
async fn persisted_session_is_reused() {
    let server = MockServer::start().await;
    // credentials are posted once, by the first client only
    mount_login(&server, INDEX_PAGE).await;
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .and(header("Cookie", "JSESSIONID=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join(session::session_file_name(&login()));
    let options = SessionOptions {
        persist: true,
        cache_path: Some(session_file.clone()),
    };

    let mut client = client_for(&server, options.clone());
    client.authenticate(&login(), &password()).await.unwrap();

    let saved = session::load_jar(&session_file).unwrap();
    assert_eq!(saved.get("JSESSIONID"), Some("fresh"));

    let mut client = client_for(&server, options);
    client.authenticate(&login(), &password()).await.unwrap();
    assert_eq!(client.view_state(), Some("123:456"));
}

#[tokio::test]
async fn session_write_failure_is_not_fatal() {
    let server = MockServer::start().await;
    mount_login(&server, INDEX_PAGE).await;

    let dir = tempfile::tempdir().unwrap();
    let options = SessionOptions {
        persist: true,
        cache_path: Some(dir.path().join("missing").join("x.session")),
    };

    let mut client = client_for(&server, options);
    client.authenticate(&login(), &password()).await.unwrap();
    assert!(client.is_authenticated());
}
