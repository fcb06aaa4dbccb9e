use crate::constants::{
    DEFAULT_LOGIN_BASE_URL, DEFAULT_MOBILE_BASE_URL,
    DEFAULT_REST_TIMEOUT, DEFAULT_UPLOAD_BASE_URL,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
    /// Guest ("no-member") mode: the id is a display name and the password
    /// protects the posts written with it.
    pub nomember: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub mobile_base_url: String,
    pub upload_base_url: String,
    pub login_base_url: String,
    pub timeout: u64,
    /// Upper bound of in-flight deletes in a batch, `None` runs the whole batch at once.
    pub max_concurrent_deletes: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Fail the upload when an attachment cannot be read instead of skipping it.
    pub strict_attachments: bool,
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"user_id\":\"{}\",\"password\":\"[REDACTED]\",\"nomember\":{}}}",
            self.user_id, self.nomember
        )
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{},\"upload\":{}}}",
            self.credentials, self.rest_api, self.upload
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"mobile_base_url\":\"{}\",\"upload_base_url\":\"{}\",\"login_base_url\":\"{}\",\"timeout\":{},\"max_concurrent_deletes\":{}}}",
            self.mobile_base_url,
            self.upload_base_url,
            self.login_base_url,
            self.timeout,
            self.max_concurrent_deletes
                .map_or("null".to_string(), |n| n.to_string())
        )
    }
}

impl fmt::Display for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"strict_attachments\":{}}}", self.strict_attachments)
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

fn get_env_optional<T: FromStr>(env_var: &str) -> Option<T> {
    let val = env::var(env_var).ok()?;
    match val.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            error!("Failed to parse {}: {}, ignoring", env_var, val);
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            credentials: Credentials {
                user_id: get_env_or_default("DC_USER_ID", String::from("ㅇㅇ")),
                password: get_env_or_default("DC_PASSWORD", String::from("1234")),
                nomember: get_env_or_default("DC_NOMEMBER", true),
            },
            rest_api: RestApiConfig {
                mobile_base_url: get_env_or_default(
                    "DC_MOBILE_BASE_URL",
                    String::from(DEFAULT_MOBILE_BASE_URL),
                ),
                upload_base_url: get_env_or_default(
                    "DC_UPLOAD_BASE_URL",
                    String::from(DEFAULT_UPLOAD_BASE_URL),
                ),
                login_base_url: get_env_or_default(
                    "DC_LOGIN_BASE_URL",
                    String::from(DEFAULT_LOGIN_BASE_URL),
                ),
                timeout: get_env_or_default("DC_REST_TIMEOUT", DEFAULT_REST_TIMEOUT),
                max_concurrent_deletes: get_env_optional("DC_MAX_CONCURRENT_DELETES"),
            },
            upload: UploadConfig {
                strict_attachments: get_env_or_default("DC_STRICT_ATTACHMENTS", false),
            },
        }
    }

    /// Points every endpoint at the same host, handy for local servers.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        self.rest_api.mobile_base_url = base_url.clone();
        self.rest_api.upload_base_url = base_url.clone();
        self.rest_api.login_base_url = base_url;
        self
    }
}
