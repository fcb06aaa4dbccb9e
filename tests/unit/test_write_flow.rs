use std::io::Write;
use std::sync::Arc;

use dc_client::application::models::article::WriteRequest;
use dc_client::application::services::article_service::{ArticleService, ArticleServiceImpl};
use dc_client::error::AppError;
use dc_client::session::interface::Session;
use dc_client::transport::http_client::DcHttpClient;
use dc_client::utils::logger::setup_logger;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::config_for;

const WRITE_ANSWER: &str = r#"<meta http-equiv="refresh" content="0;url="http://m.dcinside.com/view.php?id=programming&no=1001">"#;
const UPLOAD_ANSWER: &str = "<script>\nparent.document.getElementById('FL_DATA').value = 'FL-7';\nparent.document.getElementById('OFL_DATA').value = 'OFL-7';\n</script>";

fn service_for(server: &Server) -> ArticleServiceImpl<DcHttpClient> {
    let config = config_for(&server.url());
    let client = DcHttpClient::new(&config.rest_api).unwrap();
    ArticleServiceImpl::new(config, Arc::new(client))
}

#[tokio::test]
async fn test_write_without_images() {
    setup_logger();
    let mut server = Server::new_async().await;

    let verify = server
        .mock("POST", "/_option_write.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mode".into(), "write_verify".into()),
            Matcher::UrlEncoded("id".into(), "programming".into()),
            Matcher::UrlEncoded("w_subject".into(), "hello".into()),
        ]))
        .with_header("set-cookie", "PHPSESSID=abc; path=/")
        .with_body(r#"{"Msg":"","Data":"block-1"}"#)
        .expect(1)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/upload_imgfree_mobile.php")
        .expect(0)
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/g_write.php")
        .match_header("cookie", "PHPSESSID=abc")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("name=\"Block_key\"\r\n\r\nblock-1\r\n".into()),
            Matcher::Regex("name=\"FL_DATA\"\r\n\r\n\r\n".into()),
            Matcher::Regex("name=\"name\"\r\n\r\nㅇㅇ\r\n".into()),
            Matcher::Regex("name=\"subject\"\r\n\r\nhello\r\n".into()),
        ]))
        .with_body(WRITE_ANSWER)
        .expect(1)
        .create_async()
        .await;

    let article = service_for(&server)
        .write(
            &Session::guest("ㅇㅇ", "1234"),
            WriteRequest::new("programming", "hello", "world"),
        )
        .await
        .unwrap();

    assert_eq!(
        article.url,
        "http://m.dcinside.com/view.php?id=programming&no=1001"
    );
    assert_eq!(article.gall_id, "programming");
    assert_eq!(article.number, "1001");
    verify.assert_async().await;
    upload.assert_async().await;
    submit.assert_async().await;
}

#[tokio::test]
async fn test_write_with_image_threads_upload_tokens() {
    setup_logger();
    let mut server = Server::new_async().await;
    let mut image = NamedTempFile::new().unwrap();
    image.write_all(b"fake png bytes").unwrap();

    server
        .mock("POST", "/_option_write.php")
        .with_body(r#"{"Msg":"","Data":"block-2"}"#)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/upload_imgfree_mobile.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("name=\"upload\\[0\\]\"".into()),
            Matcher::Regex("fake png bytes".into()),
            Matcher::Regex("name=\"imgId\"\r\n\r\nprogramming\r\n".into()),
        ]))
        .with_body(UPLOAD_ANSWER)
        .expect(1)
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/g_write.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("name=\"FL_DATA\"\r\n\r\nFL-7\r\n".into()),
            Matcher::Regex("name=\"OFL_DATA\"\r\n\r\nOFL-7\r\n".into()),
        ]))
        .with_body(WRITE_ANSWER)
        .expect(1)
        .create_async()
        .await;

    let request = WriteRequest::new("programming", "pic", "see attached").image(image.path());
    let article = service_for(&server)
        .write(&Session::guest("ㅇㅇ", "1234"), request)
        .await
        .unwrap();

    assert_eq!(article.number, "1001");
    upload.assert_async().await;
    submit.assert_async().await;
}

#[tokio::test]
async fn test_write_answer_without_number_fails() {
    setup_logger();
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/_option_write.php")
        .with_body(r#"{"Msg":"","Data":"block-3"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/g_write.php")
        .with_body(r#"<meta http-equiv="refresh" content="0;url="http://m.dcinside.com/list.php?id=programming">"#)
        .create_async()
        .await;

    let result = service_for(&server)
        .write(
            &Session::guest("ㅇㅇ", "1234"),
            WriteRequest::new("programming", "hello", "world"),
        )
        .await;

    assert!(matches!(result, Err(AppError::WriteFailed)));
}

#[tokio::test]
async fn test_write_refused_handshake_stops_early() {
    setup_logger();
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/_option_write.php")
        .with_body(r#"{"Msg":"blocked","Data":""}"#)
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/g_write.php")
        .expect(0)
        .create_async()
        .await;

    let result = service_for(&server)
        .write(
            &Session::guest("ㅇㅇ", "1234"),
            WriteRequest::new("programming", "hello", "world"),
        )
        .await;

    assert!(matches!(result, Err(AppError::AuthFailed)));
    submit.assert_async().await;
}
