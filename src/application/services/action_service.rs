use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::models::article::Article,
    config::Config,
    constants::{FIELD_ID, FIELD_NO, FIELD_REPORT_MEMO, FIELD_REPORT_URL, FIELD_USER_ID},
    error::AppError,
    presentation::extract::Field,
    presentation::form::{field_map, FieldMap},
    session::interface::Session,
    transport::http_client::HttpTransport,
    transport::model::{Endpoint, HttpRequest},
};

#[derive(Debug, Deserialize)]
struct ActionResult {
    #[serde(alias = "result")]
    ok: bool,
    #[serde(default)]
    cause: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionAnswer {
    Single(ActionResult),
    Wrapped(Vec<ActionResult>),
}

/// Reads the ok/cause answer of the json apis.
///
/// `ok=false` without a cause is not an ordinary refusal and gets its own
/// error, [`AppError::ResultFalseEmptyCause`].
pub(crate) fn check_response(body: &[u8]) -> Result<(), AppError> {
    let answer: ActionAnswer = serde_json::from_slice(body).map_err(|e| {
        debug!("Action answer is not a result object: {}", e);
        AppError::ExtractionFailed(Field::ActionResult)
    })?;
    let result = match answer {
        ActionAnswer::Single(result) => result,
        ActionAnswer::Wrapped(results) => results
            .into_iter()
            .next()
            .ok_or(AppError::ExtractionFailed(Field::ActionResult))?,
    };

    if result.ok {
        return Ok(());
    }
    match result.cause.filter(|cause| !cause.is_empty()) {
        Some(cause) => Err(AppError::ActionFailed(cause)),
        None => Err(AppError::ResultFalseEmptyCause),
    }
}

/// One-shot actions on a written article. No handshake is needed for these.
#[async_trait]
pub trait ActionService: Send + Sync {
    async fn vote_up(&self, session: &Session, article: &Article) -> Result<(), AppError>;

    async fn vote_down(&self, session: &Session, article: &Article) -> Result<(), AppError>;

    async fn report(&self, session: &Session, article: &Article, memo: &str)
        -> Result<(), AppError>;
}

pub struct ActionServiceImpl<T: HttpTransport> {
    config: Arc<Config>,
    client: Arc<T>,
}

impl<T: HttpTransport> ActionServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self { config, client }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    fn article_fields(session: &Session, article: &Article) -> FieldMap {
        let mut fields = field_map(&[
            (FIELD_ID, article.gall_id.as_str()),
            (FIELD_NO, article.number.as_str()),
        ]);
        if let (Some(user_id), true) = (session.user_id(), session.is_logged_in()) {
            fields.insert(FIELD_USER_ID.to_string(), user_id.to_string());
        }
        fields
    }

    async fn action(
        &self,
        session: &Session,
        endpoint: Endpoint,
        fields: FieldMap,
    ) -> Result<(), AppError> {
        let request = HttpRequest::to(endpoint, &self.config.rest_api)
            .with_cookies(session.cookies().to_vec())
            .with_form(&fields);
        let response = self.client.execute(request).await?;

        match check_response(&response.body) {
            Ok(()) => {
                info!("{:?} accepted", endpoint);
                Ok(())
            }
            Err(e) => {
                warn!("{:?} refused: {}", endpoint, e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<T: HttpTransport + 'static> ActionService for ActionServiceImpl<T> {
    #[instrument(skip(self, session, article), fields(no = %article.number))]
    async fn vote_up(&self, session: &Session, article: &Article) -> Result<(), AppError> {
        let fields = Self::article_fields(session, article);
        self.action(session, Endpoint::VoteUp, fields).await
    }

    #[instrument(skip(self, session, article), fields(no = %article.number))]
    async fn vote_down(&self, session: &Session, article: &Article) -> Result<(), AppError> {
        let fields = Self::article_fields(session, article);
        self.action(session, Endpoint::VoteDown, fields).await
    }

    #[instrument(skip(self, session, article, memo), fields(no = %article.number))]
    async fn report(
        &self,
        session: &Session,
        article: &Article,
        memo: &str,
    ) -> Result<(), AppError> {
        let mut fields = Self::article_fields(session, article);
        fields.insert(FIELD_REPORT_URL.to_string(), article.url.clone());
        fields.insert(FIELD_REPORT_MEMO.to_string(), memo.to_string());
        self.action(session, Endpoint::Report, fields).await
    }
}
