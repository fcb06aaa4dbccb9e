use std::fmt;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::error::AppError;
use crate::presentation::form::FieldMap;
use crate::session::auth::AuthContext;
use crate::transport::model::{Cookie, Endpoint};

/// Who the requests are made as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// "No-member" posting: a free display name plus a per-post password.
    Guest { name: String, password: String },
    /// A registered account, usable once logged in.
    Member { user_id: String, password: String },
}

/// The caller's context for every operation: identity plus the cookies of a
/// member login.
///
/// Operations borrow it immutably, so any number of them can share one
/// session. Only [`Authenticator::login`] and [`Authenticator::logout`] change
/// it and they need `&mut`, which keeps credential changes single-writer.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    cookies: Vec<Cookie>,
}

impl Session {
    pub fn guest(name: &str, password: &str) -> Self {
        Self {
            identity: Identity::Guest {
                name: name.to_string(),
                password: password.to_string(),
            },
            cookies: Vec::new(),
        }
    }

    pub fn member(user_id: &str, password: &str) -> Self {
        Self {
            identity: Identity::Member {
                user_id: user_id.to_string(),
                password: password.to_string(),
            },
            cookies: Vec::new(),
        }
    }

    pub fn from_credentials(credentials: &Credentials) -> Self {
        if credentials.nomember {
            Self::guest(&credentials.user_id, &credentials.password)
        } else {
            Self::member(&credentials.user_id, &credentials.password)
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_guest(&self) -> bool {
        matches!(self.identity, Identity::Guest { .. })
    }

    pub fn is_logged_in(&self) -> bool {
        !self.is_guest() && !self.cookies.is_empty()
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Account name for member sessions, `None` for guests.
    pub fn user_id(&self) -> Option<&str> {
        match &self.identity {
            Identity::Member { user_id, .. } => Some(user_id),
            Identity::Guest { .. } => None,
        }
    }

    pub(crate) fn password(&self) -> &str {
        match &self.identity {
            Identity::Guest { password, .. } | Identity::Member { password, .. } => password,
        }
    }

    pub(crate) fn set_cookies(&mut self, cookies: Vec<Cookie>) {
        self.cookies = cookies;
    }

    pub(crate) fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    /// Fails unless this is a member session holding login cookies.
    pub(crate) fn require_login(&self) -> Result<&str, AppError> {
        match self.user_id() {
            Some(user_id) if self.is_logged_in() => Ok(user_id),
            _ => Err(AppError::Precondition("need to login".to_string())),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identity {
            Identity::Guest { name, .. } => write!(
                f,
                "{{\"identity\":\"guest\",\"name\":\"{}\",\"password\":\"[REDACTED]\"}}",
                name
            ),
            Identity::Member { user_id, .. } => write!(
                f,
                "{{\"identity\":\"member\",\"user_id\":\"{}\",\"password\":\"[REDACTED]\",\"logged_in\":{}}}",
                user_id,
                self.is_logged_in()
            ),
        }
    }
}

/// Handshakes and member login.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Posts `fields` to a verification endpoint and returns the cookies and
    /// token that authorize exactly one follow-up request.
    async fn handshake(
        &self,
        session: &Session,
        endpoint: Endpoint,
        fields: FieldMap,
    ) -> Result<AuthContext, AppError>;

    async fn login(&self, session: &mut Session) -> Result<(), AppError>;

    async fn logout(&self, session: &mut Session) -> Result<(), AppError>;
}
