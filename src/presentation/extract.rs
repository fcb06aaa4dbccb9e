use std::fmt;

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;

static FL_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\('FL_DATA'\)\.value ?= ?'(.*)'").expect("valid FL_DATA pattern"));
static OFL_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\('OFL_DATA'\)\.value ?= ?'(.*)'").expect("valid OFL_DATA pattern"));
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url="?(.*?)"?>"#).expect("valid url pattern"));
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"id=([^&]*)").expect("valid id pattern"));
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"no=(\d+)").expect("valid no pattern"));

/// The named values the protocol reads out of response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Upload token assigned in a script, `('FL_DATA').value = '...'`.
    FlData,
    /// Upload token assigned in a script, `('OFL_DATA').value = '...'`.
    OflData,
    /// Redirect target, `url="..."`.
    Url,
    /// Gallery id query parameter, `id=...`.
    GallId,
    /// Article number query parameter, `no=123`.
    Number,
    /// `Data` member of a handshake json answer.
    AuthToken,
    /// ok/cause object of the json action apis.
    ActionResult,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FlData => "FL_DATA",
            Field::OflData => "OFL_DATA",
            Field::Url => "url",
            Field::GallId => "id",
            Field::Number => "no",
            Field::AuthToken => "Data",
            Field::ActionResult => "result",
        };
        write!(f, "{}", name)
    }
}

/// Pulls named values out of opaque response bodies.
///
/// Workflows only talk to this trait, so the matching strategy can change
/// without touching them.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, body: &[u8], field: Field) -> Result<String, AppError>;

    /// All of `fields` or an error naming the first missing one, never a subset.
    fn extract_all(&self, body: &[u8], fields: &[Field]) -> Result<Vec<String>, AppError> {
        fields.iter().map(|field| self.extract(body, *field)).collect()
    }
}

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    /// Informational only, some answers carry a number or an object here.
    #[serde(rename = "Msg", default)]
    msg: Option<serde_json::Value>,
    #[serde(rename = "Data", default)]
    data: Option<String>,
}

/// Pattern based extraction, what the remote pages have been answered with so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    fn capture(re: &Regex, body: &[u8], field: Field) -> Result<String, AppError> {
        re.captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .ok_or(AppError::ExtractionFailed(field))
    }

    fn auth_token(body: &[u8]) -> Result<String, AppError> {
        let envelope: TokenEnvelope = serde_json::from_slice(body).map_err(|e| {
            debug!("Handshake answer is not a token object: {}", e);
            AppError::ExtractionFailed(Field::AuthToken)
        })?;
        if let Some(msg) = envelope
            .msg
            .as_ref()
            .filter(|m| !m.is_null() && m.as_str() != Some(""))
        {
            debug!("Handshake message: {}", msg);
        }
        envelope
            .data
            .filter(|data| !data.is_empty())
            .ok_or(AppError::ExtractionFailed(Field::AuthToken))
    }
}

impl FieldExtractor for RegexExtractor {
    fn extract(&self, body: &[u8], field: Field) -> Result<String, AppError> {
        match field {
            Field::FlData => Self::capture(&FL_DATA_RE, body, field),
            Field::OflData => Self::capture(&OFL_DATA_RE, body, field),
            Field::Url => Self::capture(&URL_RE, body, field),
            Field::GallId => Self::capture(&ID_RE, body, field),
            Field::Number => Self::capture(&NUMBER_RE, body, field),
            Field::AuthToken => Self::auth_token(body),
            Field::ActionResult => Err(AppError::ExtractionFailed(field)),
        }
    }
}
