use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use url::form_urlencoded;
use uuid::Uuid;

use crate::constants::{upload_field_name, FORM_CONTENT_TYPE};
use crate::error::AppError;
use crate::transport::model::RequestBody;

/// Field name to value, names are the exact strings the remote side expects.
pub type FieldMap = BTreeMap<String, String>;

/// Builds a [`FieldMap`] from borrowed pairs.
pub fn field_map<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect()
}

/// Encodes `fields` as a single url-encoded payload.
pub fn form_body(fields: &FieldMap) -> RequestBody {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter())
        .finish();
    RequestBody {
        bytes: encoded.into_bytes(),
        content_type: FORM_CONTENT_TYPE.to_string(),
    }
}

/// Composes `multipart/form-data` bodies: attachments first, each named after
/// its position in the attachment list, then the plain fields.
#[derive(Debug, Clone, Default)]
pub struct MultipartComposer {
    strict: bool,
}

impl MultipartComposer {
    /// With `strict` unset an unreadable attachment is logged and left out of
    /// the body; with `strict` set it fails the whole composition.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub async fn compose(
        &self,
        files: &[PathBuf],
        fields: &FieldMap,
    ) -> Result<RequestBody, AppError> {
        let boundary = Uuid::new_v4().simple().to_string();
        let mut bytes = Vec::new();

        for (index, path) in files.iter().enumerate() {
            let content = match tokio::fs::read(path).await {
                Ok(content) => content,
                Err(e) if self.strict => return Err(AppError::Io(e)),
                Err(e) => {
                    warn!("Skipping attachment {}: {}", path.display(), e);
                    continue;
                }
            };
            debug!("Attaching {} ({} bytes)", path.display(), content.len());
            write_file_part(&mut bytes, &boundary, &upload_field_name(index), path, &content);
        }

        for (name, value) in fields {
            write_field_part(&mut bytes, &boundary, name, value);
        }
        bytes.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        Ok(RequestBody {
            bytes,
            content_type: format!("multipart/form-data; boundary={}", boundary),
        })
    }
}

/// Quoted-string content for a part header: quotes and backslashes are
/// escaped, control characters are percent-encoded so no value can end the
/// header line.
fn header_param(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '"' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("%{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn write_file_part(out: &mut Vec<u8>, boundary: &str, name: &str, path: &Path, content: &[u8]) {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    out.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            boundary,
            header_param(name),
            header_param(&filename)
        )
        .as_bytes(),
    );
    out.extend_from_slice(content);
    out.extend_from_slice(b"\r\n");
}

fn write_field_part(out: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    out.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
            boundary,
            header_param(name)
        )
        .as_bytes(),
    );
    out.extend_from_slice(value.as_bytes());
    out.extend_from_slice(b"\r\n");
}
