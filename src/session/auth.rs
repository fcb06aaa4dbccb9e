/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::constants::{FIELD_PASSWORD, FIELD_USER_ID};
use crate::error::AppError;
use crate::presentation::extract::{Field, FieldExtractor, RegexExtractor};
use crate::presentation::form::{field_map, FieldMap};
use crate::session::interface::{Authenticator, Session};
use crate::transport::http_client::HttpTransport;
use crate::transport::model::{Cookie, Endpoint, HttpRequest};

/// Cookies and token won by one handshake.
///
/// Not `Clone`: [`AuthContext::attach`] consumes it, so a context authorizes
/// exactly one request.
#[derive(Debug)]
pub struct AuthContext {
    cookies: Vec<Cookie>,
    token: String,
    issued_at: DateTime<Utc>,
}

impl AuthContext {
    /// An empty token never makes a context.
    pub fn new(cookies: Vec<Cookie>, token: String) -> Result<Self, AppError> {
        if token.is_empty() {
            return Err(AppError::AuthFailed);
        }
        Ok(Self {
            cookies,
            token,
            issued_at: Utc::now(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Puts the token into `fields` under `token_field` and hands back the
    /// cookies the request has to carry.
    pub fn attach(self, token_field: &str, fields: &mut FieldMap) -> Vec<Cookie> {
        fields.insert(token_field.to_string(), self.token);
        self.cookies
    }
}

impl fmt::Display for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"cookies\":{},\"token\":\"[REDACTED]\",\"issued_at\":\"{}\"}}",
            self.cookies.len(),
            self.issued_at.to_rfc3339()
        )
    }
}

/// `fresh` cookies replace `base` cookies of the same name.
pub(crate) fn merge_cookies(base: &[Cookie], fresh: Vec<Cookie>) -> Vec<Cookie> {
    let mut merged: Vec<Cookie> = base
        .iter()
        .filter(|cookie| !fresh.iter().any(|f| f.name == cookie.name))
        .cloned()
        .collect();
    merged.extend(fresh);
    merged
}

pub struct DcAuth<T: HttpTransport> {
    config: Arc<Config>,
    client: Arc<T>,
    extractor: Arc<dyn FieldExtractor>,
}

impl<T: HttpTransport> DcAuth<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self {
            config,
            client,
            extractor: Arc::new(RegexExtractor),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn FieldExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}

#[async_trait]
impl<T: HttpTransport + 'static> Authenticator for DcAuth<T> {
    #[instrument(skip(self, session, fields))]
    async fn handshake(
        &self,
        session: &Session,
        endpoint: Endpoint,
        fields: FieldMap,
    ) -> Result<AuthContext, AppError> {
        let request = HttpRequest::to(endpoint, &self.config.rest_api)
            .with_cookies(session.cookies().to_vec())
            .with_form(&fields);

        let response = self.client.execute(request).await?;

        let token = match self.extractor.extract(&response.body, Field::AuthToken) {
            Ok(token) => token,
            Err(AppError::ExtractionFailed(_)) => {
                warn!("Handshake at {:?} returned no token", endpoint);
                return Err(AppError::AuthFailed);
            }
            Err(e) => return Err(e),
        };

        let cookies = merge_cookies(session.cookies(), response.cookies);
        let context = AuthContext::new(cookies, token)?;
        debug!("Handshake at {:?} succeeded: {}", endpoint, context);
        Ok(context)
    }

    #[instrument(skip(self, session))]
    async fn login(&self, session: &mut Session) -> Result<(), AppError> {
        let user_id = session
            .user_id()
            .ok_or_else(|| AppError::Precondition("guest sessions cannot login".to_string()))?
            .to_string();
        info!("Logging in as {}", user_id);

        let fields = field_map(&[
            (FIELD_USER_ID, user_id.as_str()),
            (FIELD_PASSWORD, session.password()),
        ]);
        let request =
            HttpRequest::to(Endpoint::Login, &self.config.rest_api).with_form(&fields);
        let response = self.client.execute(request).await?;

        if response.cookies.is_empty() {
            warn!("Login for {} returned no cookies", user_id);
            return Err(AppError::AuthFailed);
        }
        session.set_cookies(response.cookies);
        debug!("Login successful");
        Ok(())
    }

    #[instrument(skip(self, session))]
    async fn logout(&self, session: &mut Session) -> Result<(), AppError> {
        let request = HttpRequest::to(Endpoint::Logout, &self.config.rest_api)
            .with_cookies(session.cookies().to_vec());
        self.client.execute(request).await?;
        session.clear_cookies();
        debug!("Logout successful");
        Ok(())
    }
}
