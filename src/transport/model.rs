use std::collections::HashMap;
use std::fmt;

use reqwest::{Method, StatusCode};

use crate::config::RestApiConfig;
use crate::constants::{
    DELETE_PATH, DELETE_VERIFY_PATH, GALLOG_ARTICLE_DELETE_PATH, GALLOG_COMMENT_DELETE_PATH,
    LOGIN_PATH, LOGOUT_PATH, REPORT_PATH, UPLOAD_PATH, VOTE_DOWN_PATH, VOTE_UP_PATH,
    WRITE_PATH, WRITE_VERIFY_PATH, FORM_CONTENT_TYPE, FORM_CONTENT_TYPE_NO_CHARSET,
};
use crate::presentation::form::{form_body, FieldMap};
use crate::transport::headers::HeaderProfile;

/// A session cookie as handed out by the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Parses the name/value pair of a `Set-Cookie` header, attributes are dropped.
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let pair = set_cookie.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim()))
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Joins cookies into the value of a `Cookie` request header.
pub fn cookie_header(cookies: &[Cookie]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(Cookie::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Roles of the remote endpoints. Each role resolves to a url under one of the
/// configured base urls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    WriteVerify,
    Upload,
    Write,
    DeleteVerify,
    Delete,
    VoteUp,
    VoteDown,
    Report,
    Login,
    Logout,
    GallogArticleDelete,
    GallogCommentDelete,
}

impl Endpoint {
    pub fn url(&self, cfg: &RestApiConfig) -> String {
        let (base, path) = match self {
            Endpoint::WriteVerify => (&cfg.mobile_base_url, WRITE_VERIFY_PATH),
            Endpoint::Upload => (&cfg.upload_base_url, UPLOAD_PATH),
            Endpoint::Write => (&cfg.upload_base_url, WRITE_PATH),
            Endpoint::DeleteVerify => (&cfg.mobile_base_url, DELETE_VERIFY_PATH),
            Endpoint::Delete => (&cfg.mobile_base_url, DELETE_PATH),
            Endpoint::VoteUp => (&cfg.mobile_base_url, VOTE_UP_PATH),
            Endpoint::VoteDown => (&cfg.mobile_base_url, VOTE_DOWN_PATH),
            Endpoint::Report => (&cfg.mobile_base_url, REPORT_PATH),
            Endpoint::Login => (&cfg.login_base_url, LOGIN_PATH),
            Endpoint::Logout => (&cfg.login_base_url, LOGOUT_PATH),
            Endpoint::GallogArticleDelete => (&cfg.mobile_base_url, GALLOG_ARTICLE_DELETE_PATH),
            Endpoint::GallogCommentDelete => (&cfg.mobile_base_url, GALLOG_COMMENT_DELETE_PATH),
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Logout => Method::GET,
            _ => Method::POST,
        }
    }

    pub fn profile(&self) -> HeaderProfile {
        match self {
            Endpoint::WriteVerify
            | Endpoint::Upload
            | Endpoint::Write
            | Endpoint::DeleteVerify
            | Endpoint::Delete => HeaderProfile::Mobile,
            Endpoint::VoteUp
            | Endpoint::VoteDown
            | Endpoint::Report
            | Endpoint::GallogArticleDelete
            | Endpoint::GallogCommentDelete => HeaderProfile::App,
            Endpoint::Login | Endpoint::Logout => HeaderProfile::Desktop,
        }
    }

    /// Content type of url-encoded forms sent to this role.
    pub fn form_content_type(&self) -> &'static str {
        match self {
            Endpoint::Login
            | Endpoint::Logout
            | Endpoint::GallogArticleDelete
            | Endpoint::GallogCommentDelete => FORM_CONTENT_TYPE_NO_CHARSET,
            _ => FORM_CONTENT_TYPE,
        }
    }
}

/// An encoded request body together with the content type it must be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    pub url: String,
    pub cookies: Vec<Cookie>,
    pub body: Option<RequestBody>,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Request for `endpoint` with the method, url and headers of its role.
    pub fn to(endpoint: Endpoint, cfg: &RestApiConfig) -> Self {
        Self {
            endpoint,
            method: endpoint.method(),
            url: endpoint.url(cfg),
            cookies: Vec::new(),
            body: None,
            headers: endpoint.profile().headers(),
        }
    }

    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Url-encoded `fields` with the form content type of the endpoint.
    pub fn with_form(self, fields: &FieldMap) -> Self {
        let mut body = form_body(fields);
        body.content_type = self.endpoint.form_content_type().to_string();
        self.with_body(body)
    }
}

/// What the core needs back from the wire.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub cookies: Vec<Cookie>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::OK,
            cookies: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }
}
