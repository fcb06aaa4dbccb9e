use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{
    application::models::gallog::GallogEntry,
    application::services::action_service::check_response,
    application::services::batch::drain_all,
    config::Config,
    constants::{
        FIELD_COMMENT_NO, FIELD_CON_KEY, FIELD_ID, FIELD_NO, FIELD_TOKEN_VERIFY, FIELD_USER_ID,
        TOKEN_VERIFY_GALLOG_DELETE,
    },
    error::AppError,
    presentation::form::field_map,
    session::auth::DcAuth,
    session::interface::{Authenticator, Session},
    transport::http_client::HttpTransport,
    transport::model::{Endpoint, HttpRequest},
};

/// Removing entries from a member's gallog.
#[async_trait]
pub trait GallogService: Send + Sync {
    async fn delete_entry(&self, session: &Session, entry: &GallogEntry) -> Result<(), AppError>;

    /// Deletes all `entries` concurrently, see [`drain_all`] for the outcome.
    async fn delete_entries(&self, session: &Session, entries: &[GallogEntry])
        -> Result<(), AppError>;
}

pub struct GallogServiceImpl<T: HttpTransport> {
    config: Arc<Config>,
    client: Arc<T>,
    auth: DcAuth<T>,
}

impl<T: HttpTransport> GallogServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self {
            auth: DcAuth::new(config.clone(), client.clone()),
            config,
            client,
        }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}

#[async_trait]
impl<T: HttpTransport + 'static> GallogService for GallogServiceImpl<T> {
    #[instrument(skip(self, session))]
    async fn delete_entry(&self, session: &Session, entry: &GallogEntry) -> Result<(), AppError> {
        let user_id = session.require_login()?;

        let verify = field_map(&[(FIELD_TOKEN_VERIFY, TOKEN_VERIFY_GALLOG_DELETE)]);
        let auth = self.auth.handshake(session, Endpoint::DeleteVerify, verify).await?;

        let mut fields = field_map(&[
            (FIELD_ID, entry.gall_id()),
            (FIELD_NO, entry.number()),
            (FIELD_USER_ID, user_id),
        ]);
        let endpoint = match entry {
            GallogEntry::Article { .. } => Endpoint::GallogArticleDelete,
            GallogEntry::Comment { comment_number, .. } => {
                fields.insert(FIELD_COMMENT_NO.to_string(), comment_number.clone());
                Endpoint::GallogCommentDelete
            }
        };
        let cookies = auth.attach(FIELD_CON_KEY, &mut fields);

        let request = HttpRequest::to(endpoint, &self.config.rest_api)
            .with_cookies(cookies)
            .with_form(&fields);
        let response = self.client.execute(request).await?;
        check_response(&response.body)?;
        debug!("Gallog entry deleted");
        Ok(())
    }

    #[instrument(skip(self, session, entries), fields(entries = entries.len()))]
    async fn delete_entries(
        &self,
        session: &Session,
        entries: &[GallogEntry],
    ) -> Result<(), AppError> {
        drain_all(
            entries.iter().map(|entry| self.delete_entry(session, entry)),
            self.config.rest_api.max_concurrent_deletes,
        )
        .await
    }
}
