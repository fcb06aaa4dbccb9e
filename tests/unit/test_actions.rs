use std::sync::Arc;

use dc_client::application::models::article::Article;
use dc_client::application::services::action_service::{ActionService, ActionServiceImpl};
use dc_client::error::AppError;
use dc_client::session::auth::DcAuth;
use dc_client::session::interface::{Authenticator, Session};
use dc_client::transport::http_client::DcHttpClient;
use dc_client::utils::logger::setup_logger;
use mockito::{Matcher, Server};

use crate::common::config_for;

fn article() -> Article {
    Article::new(
        "http://m.dcinside.com/view.php?id=programming&no=7",
        "programming",
        "7",
    )
}

#[tokio::test]
async fn test_member_votes_with_login_cookies() {
    setup_logger();
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", "/join/member_check.php")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "someone".into()),
            Matcher::UrlEncoded("password".into(), "secret".into()),
        ]))
        .with_header("set-cookie", "mc_enc=member; path=/")
        .with_body("")
        .expect(1)
        .create_async()
        .await;
    let vote = server
        .mock("POST", "/api/_recommend_up.php")
        .match_header("cookie", "mc_enc=member")
        .match_body(Matcher::UrlEncoded("user_id".into(), "someone".into()))
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;
    let logout = server
        .mock("GET", "/join/logout.php")
        .match_header("cookie", "mc_enc=member")
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let client = Arc::new(DcHttpClient::new(&config.rest_api).unwrap());
    let auth = DcAuth::new(config.clone(), client.clone());
    let actions = ActionServiceImpl::new(config, client);

    let mut session = Session::member("someone", "secret");
    auth.login(&mut session).await.unwrap();
    actions.vote_up(&session, &article()).await.unwrap();
    auth.logout(&mut session).await.unwrap();

    assert!(!session.is_logged_in());
    login.assert_async().await;
    vote.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn test_report_refusals() {
    setup_logger();
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api/report_upload.php")
        .match_body(Matcher::UrlEncoded("report_memo".into(), "spam".into()))
        .with_body(r#"{"ok":false,"cause":"already reported"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/_recommend_down.php")
        .with_body(r#"{"ok":false,"cause":""}"#)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let client = Arc::new(DcHttpClient::new(&config.rest_api).unwrap());
    let actions = ActionServiceImpl::new(config, client);
    let guest = Session::guest("ㅇㅇ", "1234");

    let report = actions.report(&guest, &article(), "spam").await;
    assert!(matches!(report, Err(AppError::ActionFailed(cause)) if cause == "already reported"));

    let vote = actions.vote_down(&guest, &article()).await;
    assert!(matches!(vote, Err(AppError::ResultFalseEmptyCause)));
}
