use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::models::article::{Article, UploadResult, WriteRequest},
    application::services::batch::drain_all,
    config::Config,
    constants::{
        FIELD_BLOCK_KEY, FIELD_CON_KEY, FIELD_FILTER, FIELD_FL_DATA, FIELD_ID, FIELD_IMG_ID,
        FIELD_IMG_NUM, FIELD_MEMO, FIELD_MOBILE_KEY, FIELD_MODE, FIELD_NAME, FIELD_NO,
        FIELD_OFL_DATA, FIELD_PASSWORD, FIELD_SUBJECT, FIELD_TOKEN_VERIFY,
        FIELD_W_FILTER, FIELD_W_MEMO, FIELD_W_SUBJECT, FIELD_WRITE_PW, FILTER_ON, IMG_NUM,
        MOBILE_KEY_NOMEMBER, MODE_BOARD_DELETE, MODE_WRITE, MODE_WRITE_VERIFY,
        TOKEN_VERIFY_NONUSER_DELETE,
    },
    error::AppError,
    presentation::extract::{Field, FieldExtractor, RegexExtractor},
    presentation::form::{field_map, FieldMap, MultipartComposer},
    session::auth::DcAuth,
    session::interface::{Authenticator, Identity, Session},
    transport::http_client::HttpTransport,
    transport::model::{Endpoint, HttpRequest},
};

/// Writing, image uploading and deleting articles.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Writes an article: handshake, image upload when there are images,
    /// submission, then reading the new article's address from the answer.
    async fn write(&self, session: &Session, request: WriteRequest) -> Result<Article, AppError>;

    /// Uploads images and returns the tokens that reference them.
    ///
    /// The upload host takes no session: the request is sent without cookies
    /// whatever `session` holds. It stays in the signature so implementations
    /// with a session-bound upload fit the same trait.
    async fn upload_images(
        &self,
        session: &Session,
        gall_id: &str,
        images: &[PathBuf],
    ) -> Result<UploadResult, AppError>;

    async fn delete_article(&self, session: &Session, article: &Article) -> Result<(), AppError>;

    /// Deletes all `articles` concurrently, see [`drain_all`] for the outcome.
    async fn delete_articles(&self, session: &Session, articles: &[Article])
        -> Result<(), AppError>;
}

pub struct ArticleServiceImpl<T: HttpTransport> {
    config: Arc<Config>,
    client: Arc<T>,
    auth: DcAuth<T>,
    extractor: Arc<dyn FieldExtractor>,
    composer: MultipartComposer,
}

impl<T: HttpTransport> ArticleServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        let composer = MultipartComposer::new(config.upload.strict_attachments);
        Self {
            auth: DcAuth::new(config.clone(), client.clone()),
            config,
            client,
            extractor: Arc::new(RegexExtractor),
            composer,
        }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Who is writing, as the write form spells it. Members sign with their
    /// account name and password the same way guests do.
    fn identity_fields(session: &Session) -> FieldMap {
        let name = match session.identity() {
            Identity::Guest { name, .. } => name.as_str(),
            Identity::Member { user_id, .. } => user_id.as_str(),
        };
        field_map(&[
            (FIELD_NAME, name),
            (FIELD_PASSWORD, session.password()),
            (FIELD_MOBILE_KEY, MOBILE_KEY_NOMEMBER),
        ])
    }
}

#[async_trait]
impl<T: HttpTransport + 'static> ArticleService for ArticleServiceImpl<T> {
    #[instrument(skip(self, session, request), fields(gall_id = %request.gall_id))]
    async fn write(&self, session: &Session, request: WriteRequest) -> Result<Article, AppError> {
        let mut fields = Self::identity_fields(session);

        let verify = field_map(&[
            (FIELD_ID, request.gall_id.as_str()),
            (FIELD_W_SUBJECT, request.subject.as_str()),
            (FIELD_W_MEMO, request.content.as_str()),
            (FIELD_W_FILTER, FILTER_ON),
            (FIELD_MODE, MODE_WRITE_VERIFY),
        ]);
        let auth = self.auth.handshake(session, Endpoint::WriteVerify, verify).await?;

        let upload = if request.has_images() {
            self.upload_images(session, &request.gall_id, &request.images)
                .await?
        } else {
            UploadResult::default()
        };

        fields.extend(field_map(&[
            (FIELD_SUBJECT, request.subject.as_str()),
            (FIELD_MEMO, request.content.as_str()),
            (FIELD_MODE, MODE_WRITE),
            (FIELD_ID, request.gall_id.as_str()),
            (FIELD_FL_DATA, upload.fl_data.as_str()),
            (FIELD_OFL_DATA, upload.ofl_data.as_str()),
            (FIELD_FILTER, FILTER_ON),
        ]));
        let cookies = auth.attach(FIELD_BLOCK_KEY, &mut fields);

        // images went up with the upload request, the submission only names them
        let body = self.composer.compose(&[], &fields).await?;
        let submission = HttpRequest::to(Endpoint::Write, &self.config.rest_api)
            .with_cookies(cookies)
            .with_body(body);
        let response = self.client.execute(submission).await?;

        let values = self
            .extractor
            .extract_all(&response.body, &[Field::Url, Field::GallId, Field::Number])
            .map_err(|e| match e {
                AppError::ExtractionFailed(field) => {
                    warn!("Write answer lacks {}", field);
                    AppError::WriteFailed
                }
                other => other,
            })?;
        let [url, gall_id, number]: [String; 3] =
            values.try_into().map_err(|_| AppError::WriteFailed)?;

        let article = Article {
            url,
            gall_id,
            number,
        };
        info!("Article written: {}", article);
        Ok(article)
    }

    #[instrument(skip(self, _session, images), fields(images = images.len()))]
    async fn upload_images(
        &self,
        _session: &Session,
        gall_id: &str,
        images: &[PathBuf],
    ) -> Result<UploadResult, AppError> {
        let fields = field_map(&[
            (FIELD_IMG_ID, gall_id),
            (FIELD_MODE, MODE_WRITE),
            (FIELD_IMG_NUM, IMG_NUM),
        ]);
        let body = self.composer.compose(images, &fields).await?;
        let request = HttpRequest::to(Endpoint::Upload, &self.config.rest_api).with_body(body);
        let response = self.client.execute(request).await?;

        let fl_data = self.extractor.extract(&response.body, Field::FlData)?;
        let ofl_data = self.extractor.extract(&response.body, Field::OflData)?;
        debug!("Images uploaded to {}", gall_id);
        Ok(UploadResult { fl_data, ofl_data })
    }

    #[instrument(skip(self, session, article), fields(gall_id = %article.gall_id, no = %article.number))]
    async fn delete_article(&self, session: &Session, article: &Article) -> Result<(), AppError> {
        // only the guest password flow exists for article deletes
        if !session.is_guest() {
            return Err(AppError::Precondition("need to login".to_string()));
        }
        let verify = field_map(&[(FIELD_TOKEN_VERIFY, TOKEN_VERIFY_NONUSER_DELETE)]);
        let mut fields = field_map(&[
            (FIELD_ID, article.gall_id.as_str()),
            (FIELD_WRITE_PW, session.password()),
            (FIELD_NO, article.number.as_str()),
            (FIELD_MODE, MODE_BOARD_DELETE),
        ]);

        let auth = self.auth.handshake(session, Endpoint::DeleteVerify, verify).await?;
        let cookies = auth.attach(FIELD_CON_KEY, &mut fields);

        let request = HttpRequest::to(Endpoint::Delete, &self.config.rest_api)
            .with_cookies(cookies)
            .with_form(&fields);
        let response = self.client.execute(request).await?;
        debug!(
            "Delete answered: {}",
            String::from_utf8_lossy(&response.body)
        );
        Ok(())
    }

    #[instrument(skip(self, session, articles), fields(articles = articles.len()))]
    async fn delete_articles(
        &self,
        session: &Session,
        articles: &[Article],
    ) -> Result<(), AppError> {
        drain_all(
            articles
                .iter()
                .map(|article| self.delete_article(session, article)),
            self.config.rest_api.max_concurrent_deletes,
        )
        .await
    }
}
