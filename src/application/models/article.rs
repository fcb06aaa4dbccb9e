/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A written article, the input of vote, report and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    #[serde(rename = "gallId")]
    pub gall_id: String,
    pub number: String,
}

impl Article {
    pub fn new(url: &str, gall_id: &str, number: &str) -> Self {
        Self {
            url: url.to_string(),
            gall_id: gall_id.to_string(),
            number: number.to_string(),
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"url\":\"{}\",\"gallId\":\"{}\",\"number\":\"{}\"}}",
            self.url, self.gall_id, self.number
        )
    }
}

/// Tokens naming uploaded images, passed on verbatim to the write request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResult {
    pub fl_data: String,
    pub ofl_data: String,
}

/// Everything needed to write one article.
///
/// # Example
///
/// ```
/// use dc_client::application::models::article::WriteRequest;
///
/// let request = WriteRequest::new("programming", "subject", "content")
///     .image("cat.png")
///     .image("dog.jpg");
/// assert_eq!(request.images.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub gall_id: String,
    pub subject: String,
    pub content: String,
    pub images: Vec<PathBuf>,
}

impl WriteRequest {
    pub fn new(gall_id: &str, subject: &str, content: &str) -> Self {
        Self {
            gall_id: gall_id.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
            images: Vec::new(),
        }
    }

    pub fn image(mut self, path: impl Into<PathBuf>) -> Self {
        self.images.push(path.into());
        self
    }

    pub fn images<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.images.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}
