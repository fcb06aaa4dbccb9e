use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dc_client::config::Config;
use dc_client::error::AppError;
use dc_client::transport::http_client::HttpTransport;
use dc_client::transport::model::{Cookie, Endpoint, HttpRequest, RawResponse};

pub fn config_for(base_url: &str) -> Arc<Config> {
    Arc::new(Config::default().with_base_url(base_url))
}

pub fn form_fields(request: &HttpRequest) -> BTreeMap<String, String> {
    request
        .body
        .as_ref()
        .map(|b| url::form_urlencoded::parse(&b.bytes).into_owned().collect())
        .unwrap_or_default()
}

/// In-memory transport for the gallog delete flow. Every delete sleeps, the
/// delete of `failing_no` is refused and answers first.
pub struct ScriptedTransport {
    pub failing_no: String,
    pub completed_deletes: AtomicUsize,
    pub handshakes: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(failing_no: &str) -> Self {
        Self {
            failing_no: failing_no.to_string(),
            completed_deletes: AtomicUsize::new(0),
            handshakes: AtomicUsize::new(0),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed_deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, AppError> {
        match request.endpoint {
            Endpoint::Login => {
                Ok(RawResponse::ok("").with_cookies(vec![Cookie::new("member_sid", "m")]))
            }
            Endpoint::DeleteVerify => {
                self.handshakes.fetch_add(1, Ordering::SeqCst);
                Ok(RawResponse::ok(r#"{"Msg":"","Data":"con-key"}"#))
            }
            Endpoint::GallogArticleDelete => {
                let fields = form_fields(&request);
                let refused = fields.get("no") == Some(&self.failing_no);
                let delay = if refused { 1 } else { 40 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                self.completed_deletes.fetch_add(1, Ordering::SeqCst);
                if refused {
                    Ok(RawResponse::ok(r#"{"ok":false,"cause":"not yours"}"#))
                } else {
                    Ok(RawResponse::ok(r#"{"ok":true}"#))
                }
            }
            other => Err(AppError::Transport(format!("unexpected endpoint {:?}", other))),
        }
    }
}
