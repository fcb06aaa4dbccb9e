use std::sync::atomic::Ordering;
use std::sync::Arc;

use dc_client::application::models::article::Article;
use dc_client::application::models::gallog::GallogEntry;
use dc_client::application::services::article_service::{ArticleService, ArticleServiceImpl};
use dc_client::application::services::gallog_service::{GallogService, GallogServiceImpl};
use dc_client::config::Config;
use dc_client::error::AppError;
use dc_client::session::auth::DcAuth;
use dc_client::session::interface::{Authenticator, Session};
use dc_client::transport::http_client::DcHttpClient;
use dc_client::utils::logger::setup_logger;
use mockito::{Matcher, Server};

use crate::common::{config_for, ScriptedTransport};

#[tokio::test]
async fn test_guest_delete_sends_con_key_and_password() {
    setup_logger();
    let mut server = Server::new_async().await;

    let verify = server
        .mock("POST", "/_access_token.php")
        .match_body(Matcher::UrlEncoded("token_verify".into(), "nonuser_del".into()))
        .with_header("set-cookie", "PHPSESSID=del; path=/")
        .with_body(r#"{"Msg":"","Data":"con-1"}"#)
        .expect(1)
        .create_async()
        .await;
    let delete = server
        .mock("POST", "/_option_write.php")
        .match_header("cookie", "PHPSESSID=del")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("con_key".into(), "con-1".into()),
            Matcher::UrlEncoded("write_pw".into(), "1234".into()),
            Matcher::UrlEncoded("no".into(), "42".into()),
            Matcher::UrlEncoded("mode".into(), "board_del2".into()),
        ]))
        .with_body("true")
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let client = Arc::new(DcHttpClient::new(&config.rest_api).unwrap());
    let service = ArticleServiceImpl::new(config, client);
    let article = Article::new(
        "http://m.dcinside.com/view.php?id=programming&no=42",
        "programming",
        "42",
    );

    service
        .delete_article(&Session::guest("ㅇㅇ", "1234"), &article)
        .await
        .unwrap();

    verify.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_batch_delete_with_one_refused_handshake() {
    setup_logger();
    let mut server = Server::new_async().await;

    // one at a time: the first two handshakes are granted, the last two refused
    let granted = server
        .mock("POST", "/_access_token.php")
        .with_body(r#"{"Msg":"","Data":"con"}"#)
        .expect(2)
        .create_async()
        .await;
    let refused = server
        .mock("POST", "/_access_token.php")
        .with_body(r#"{"Msg":"","Data":""}"#)
        .expect(2)
        .create_async()
        .await;
    let delete = server
        .mock("POST", "/_option_write.php")
        .with_body("true")
        .expect(2)
        .create_async()
        .await;

    let mut config = Config::default().with_base_url(&server.url());
    config.rest_api.max_concurrent_deletes = Some(1);
    let config = Arc::new(config);
    let client = Arc::new(DcHttpClient::new(&config.rest_api).unwrap());
    let service = ArticleServiceImpl::new(config, client);
    let articles: Vec<Article> = (1..=4)
        .map(|n| Article::new("", "programming", &n.to_string()))
        .collect();

    let result = service
        .delete_articles(&Session::guest("ㅇㅇ", "1234"), &articles)
        .await;

    assert!(matches!(result, Err(AppError::AuthFailed)));
    granted.assert_async().await;
    refused.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_gallog_batch_drains_every_entry() {
    setup_logger();
    let config = Arc::new(Config::default().with_base_url("http://localhost"));
    let transport = Arc::new(ScriptedTransport::new("3"));

    let mut session = Session::member("someone", "secret");
    DcAuth::new(config.clone(), transport.clone())
        .login(&mut session)
        .await
        .unwrap();
    assert!(session.is_logged_in());

    let entries: Vec<GallogEntry> = (1..=5)
        .map(|n| GallogEntry::article("programming", &n.to_string()))
        .collect();
    let service = GallogServiceImpl::new(config, transport.clone());

    let result = service.delete_entries(&session, &entries).await;

    // the refused entry answers first, the batch still waits for the others
    assert_eq!(transport.completed(), 5);
    assert_eq!(transport.handshakes.load(Ordering::SeqCst), 5);
    assert!(matches!(result, Err(AppError::ActionFailed(cause)) if cause == "not yours"));
}

#[tokio::test]
async fn test_gallog_delete_needs_login() {
    let config = Arc::new(Config::default().with_base_url("http://localhost"));
    let transport = Arc::new(ScriptedTransport::new(""));
    let service = GallogServiceImpl::new(config, transport.clone());

    let result = service
        .delete_entries(
            &Session::member("someone", "secret"),
            &[GallogEntry::article("programming", "1")],
        )
        .await;

    assert!(matches!(result, Err(AppError::Precondition(_))));
    assert_eq!(transport.handshakes.load(Ordering::SeqCst), 0);
}
